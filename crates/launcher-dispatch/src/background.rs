//! Background trigger router.
//!
//! The toolbar icon and two keyboard commands are the only ways a launcher
//! surface gets opened. Each one decides the launch mode, which travels to
//! the surface as query parameters on its address.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::{debug, info, warn};
use url::Url;

use launcher_protocols::{LaunchContext, TabHost, TabId};

/// Command that opens the launcher in a new tab.
pub const OPEN_LAUNCHER: &str = "open-launcher";
/// Command that opens the launcher in place of the active tab.
pub const OPEN_LAUNCHER_CURRENT: &str = "open-launcher-current";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LauncherTrigger {
    IconClicked,
    OpenInNewTab,
    OpenInCurrentTab,
}

impl LauncherTrigger {
    /// Map a keyboard command name. Unknown commands yield `None`.
    pub fn from_command(command: &str) -> Option<Self> {
        match command {
            OPEN_LAUNCHER => Some(LauncherTrigger::OpenInNewTab),
            OPEN_LAUNCHER_CURRENT => Some(LauncherTrigger::OpenInCurrentTab),
            _ => None,
        }
    }
}

impl FromStr for LauncherTrigger {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "icon" => Ok(LauncherTrigger::IconClicked),
            other => Self::from_command(other).ok_or_else(|| format!("unknown trigger: {}", other)),
        }
    }
}

impl fmt::Display for LauncherTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LauncherTrigger::IconClicked => "icon",
            LauncherTrigger::OpenInNewTab => OPEN_LAUNCHER,
            LauncherTrigger::OpenInCurrentTab => OPEN_LAUNCHER_CURRENT,
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// A new tab was created at the launcher address.
    Opened { tab: TabId, address: Url },
    /// The active tab was sent to the launcher address.
    Replaced { tab: TabId, address: Url },
    /// No tab was touched.
    Skipped,
}

pub struct TriggerRouter {
    host: Arc<dyn TabHost>,
    launcher_page: Url,
}

impl TriggerRouter {
    /// `launcher_page` is the bare launcher address; any query is dropped.
    pub fn new(host: Arc<dyn TabHost>, launcher_page: Url) -> Self {
        Self { host, launcher_page }
    }

    /// Route a named keyboard command. Unknown names are ignored.
    pub async fn on_command(&self, command: &str) -> TriggerOutcome {
        match LauncherTrigger::from_command(command) {
            Some(trigger) => self.trigger(trigger).await,
            None => {
                debug!("Ignoring unknown command {:?}", command);
                TriggerOutcome::Skipped
            }
        }
    }

    pub async fn trigger(&self, trigger: LauncherTrigger) -> TriggerOutcome {
        debug!("Launcher trigger: {}", trigger);
        match trigger {
            LauncherTrigger::IconClicked | LauncherTrigger::OpenInNewTab => self.open_new_tab().await,
            LauncherTrigger::OpenInCurrentTab => self.replace_active_tab().await,
        }
    }

    async fn open_new_tab(&self) -> TriggerOutcome {
        let address = LaunchContext::new_tab().launcher_address(&self.launcher_page);
        match self.host.create_tab(address.as_str()).await {
            Ok(tab) => {
                info!("Opened launcher in new tab {}", tab);
                TriggerOutcome::Opened { tab, address }
            }
            Err(e) => {
                warn!("Failed to open launcher tab: {}", e);
                TriggerOutcome::Skipped
            }
        }
    }

    async fn replace_active_tab(&self) -> TriggerOutcome {
        let active = match self.host.active_tab().await {
            Ok(Some(tab)) => tab,
            Ok(None) => {
                debug!("No active tab to replace");
                return TriggerOutcome::Skipped;
            }
            Err(e) => {
                warn!("Failed to read the active tab: {}", e);
                return TriggerOutcome::Skipped;
            }
        };

        let address = LaunchContext::current_tab(active.url.clone()).launcher_address(&self.launcher_page);
        match self.host.navigate(&active.id, address.as_str()).await {
            Ok(()) => {
                info!("Opened launcher in tab {} replacing {}", active.id, active.url);
                TriggerOutcome::Replaced {
                    tab: active.id,
                    address,
                }
            }
            Err(e) => {
                warn!("Failed to open launcher in tab {}: {}", active.id, e);
                TriggerOutcome::Skipped
            }
        }
    }
}
