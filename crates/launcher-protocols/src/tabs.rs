//! Browser tab protocol.
//!
//! The dispatcher and the background router only see tabs through this
//! trait; the real browser (or a test double) sits behind it.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TabError;

/// Opaque tab identifier assigned by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub String);

impl TabId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque window identifier assigned by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub String);

impl WindowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot of one open tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabInfo {
    pub id: TabId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_id: Option<WindowId>,
    pub url: String,
    #[serde(default)]
    pub active: bool,
}

/// Tab and window operations provided by the browser.
///
/// Every call suspends until the browser answers; none of them time out.
#[async_trait]
pub trait TabHost: Send + Sync {
    /// Enumerate all open tabs across all windows, in host order.
    async fn query_tabs(&self) -> Result<Vec<TabInfo>, TabError>;

    /// The active tab of the focused window, if any.
    async fn active_tab(&self) -> Result<Option<TabInfo>, TabError>;

    /// Bring a window to the foreground.
    async fn focus_window(&self, window: &WindowId) -> Result<(), TabError>;

    /// Make a tab the active tab of its window.
    async fn activate_tab(&self, tab: &TabId) -> Result<(), TabError>;

    /// Load `url` in an existing tab.
    async fn navigate(&self, tab: &TabId, url: &str) -> Result<(), TabError>;

    /// Close a tab.
    async fn close_tab(&self, tab: &TabId) -> Result<(), TabError>;

    /// Open a new tab at `url`.
    async fn create_tab(&self, url: &str) -> Result<TabId, TabError>;
}
