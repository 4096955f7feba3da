//! Launch context: how the launcher surface was opened.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

use crate::tabs::TabId;

/// Query parameter carrying the launch mode.
pub const MODE_PARAM: &str = "mode";
/// Query parameter carrying the URL the launcher replaced.
pub const PREV_URL_PARAM: &str = "prevUrl";

/// Whether the launcher lives in its own tab or replaced the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaunchMode {
    /// Opened in a fresh tab; closed after switching elsewhere.
    #[default]
    New,
    /// Replaced the active tab; restored to the previous URL after switching.
    Current,
}

impl LaunchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LaunchMode::New => "new",
            LaunchMode::Current => "current",
        }
    }
}

impl fmt::Display for LaunchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LaunchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(LaunchMode::New),
            "current" => Ok(LaunchMode::Current),
            other => Err(format!("unknown launch mode: {}", other)),
        }
    }
}

/// The (mode, previous URL) pair threaded from the trigger to the dispatcher.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchContext {
    pub mode: LaunchMode,
    /// Tab hosting the launcher surface, when known.
    pub origin_tab_id: Option<TabId>,
    /// URL the launcher replaced; empty in `New` mode.
    pub previous_url: String,
}

impl LaunchContext {
    pub fn new_tab() -> Self {
        Self::default()
    }

    pub fn current_tab(previous_url: impl Into<String>) -> Self {
        Self {
            mode: LaunchMode::Current,
            origin_tab_id: None,
            previous_url: previous_url.into(),
        }
    }

    pub fn with_origin(mut self, tab: TabId) -> Self {
        self.origin_tab_id = Some(tab);
        self
    }

    /// Read the context from a launcher address query string.
    ///
    /// Missing parameters default to `mode=new` and an empty previous URL;
    /// an unrecognized mode also falls back to `new`.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut ctx = Self::default();

        for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match name.as_ref() {
                MODE_PARAM if !value.is_empty() => {
                    ctx.mode = value.parse().unwrap_or_else(|e| {
                        warn!("{}, opening launcher in new-tab mode", e);
                        LaunchMode::New
                    });
                }
                PREV_URL_PARAM => ctx.previous_url = value.into_owned(),
                _ => {}
            }
        }

        ctx
    }

    /// Read the context from the launcher surface's full address.
    pub fn from_address(address: &Url) -> Self {
        Self::from_query(address.query().unwrap_or(""))
    }

    /// Build the launcher surface address for this context.
    ///
    /// New-tab launches carry no parameters; current-tab launches encode
    /// the mode and the replaced URL.
    pub fn launcher_address(&self, base: &Url) -> Url {
        let mut address = base.clone();
        address.set_query(None);

        if self.mode == LaunchMode::Current {
            let mut pairs = address.query_pairs_mut();
            pairs.append_pair(MODE_PARAM, self.mode.as_str());
            if !self.previous_url.is_empty() {
                pairs.append_pair(PREV_URL_PARAM, &self.previous_url);
            }
        }

        address
    }
}

#[cfg(test)]
#[path = "launch_tests.rs"]
mod tests;
