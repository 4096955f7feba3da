//! Routing dispatcher.
//!
//! Given a matched binding, either focus a tab that already shows the
//! destination or load the destination in the launcher tab. Tab failures
//! are logged and degrade; dispatch itself never fails.

use std::sync::Arc;

use tracing::{debug, info, warn};

use launcher_protocols::{
    Destination, LaunchContext, LaunchMode, RuntimeMessage, TabHost, TabId, TabInfo,
};

/// What happened to the launcher tab after switching away from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LauncherDisposition {
    /// New-tab launch: the launcher tab was closed.
    Closed,
    /// Current-tab launch: the launcher tab went back to the replaced URL.
    Restored(String),
    /// Left as it is.
    Untouched,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// An open tab matched and was brought to the front.
    Switched {
        tab: TabId,
        launcher: LauncherDisposition,
    },
    /// The launcher tab was sent to the destination URL.
    Navigated { tab: TabId, url: String },
    /// Nothing to do.
    NoOp,
}

pub struct Dispatcher {
    host: Arc<dyn TabHost>,
}

impl Dispatcher {
    pub fn new(host: Arc<dyn TabHost>) -> Self {
        Self { host }
    }

    /// Handle a message from the launcher surface. `sender` is the tab
    /// the message came from.
    pub async fn handle_message(&self, message: RuntimeMessage, sender: Option<TabId>) -> DispatchOutcome {
        let (destination, ctx) = message.into_parts(sender);
        self.dispatch(&destination, &ctx).await
    }

    pub async fn dispatch(&self, destination: &Destination, ctx: &LaunchContext) -> DispatchOutcome {
        if let Some(tab) = self.switch_to_match(&destination.match_keyword, ctx).await {
            let launcher = self.resolve_launcher(ctx).await;
            return DispatchOutcome::Switched { tab, launcher };
        }

        if destination.url.is_empty() {
            debug!("No matching tab and no URL, nothing to dispatch");
            return DispatchOutcome::NoOp;
        }

        let Some(launcher_tab) = ctx.origin_tab_id.as_ref() else {
            warn!("No launcher tab to navigate to {}", destination.url);
            return DispatchOutcome::NoOp;
        };

        match self.host.navigate(launcher_tab, &destination.url).await {
            Ok(()) => {
                info!("Navigated tab {} to {}", launcher_tab, destination.url);
                DispatchOutcome::Navigated {
                    tab: launcher_tab.clone(),
                    url: destination.url.clone(),
                }
            }
            Err(e) => {
                warn!("Failed to navigate tab {} to {}: {}", launcher_tab, destination.url, e);
                DispatchOutcome::NoOp
            }
        }
    }

    /// Find and focus the first tab whose URL starts with `keyword`.
    ///
    /// `None` when the keyword is empty, nothing matches, or any tab call
    /// fails.
    async fn switch_to_match(&self, keyword: &str, ctx: &LaunchContext) -> Option<TabId> {
        if keyword.is_empty() {
            return None;
        }

        let tabs = match self.host.query_tabs().await {
            Ok(tabs) => tabs,
            Err(e) => {
                warn!("Failed to enumerate tabs, treating as no match: {}", e);
                return None;
            }
        };

        let target = first_match(&tabs, keyword, ctx.origin_tab_id.as_ref())?;

        if let Some(window) = &target.window_id {
            if let Err(e) = self.host.focus_window(window).await {
                warn!("Failed to focus window {}, treating as no match: {}", window, e);
                return None;
            }
        }
        if let Err(e) = self.host.activate_tab(&target.id).await {
            warn!("Failed to activate tab {}, treating as no match: {}", target.id, e);
            return None;
        }

        info!("Switched to tab {} ({})", target.id, target.url);
        Some(target.id.clone())
    }

    async fn resolve_launcher(&self, ctx: &LaunchContext) -> LauncherDisposition {
        let Some(launcher_tab) = ctx.origin_tab_id.as_ref() else {
            return LauncherDisposition::Untouched;
        };

        match ctx.mode {
            LaunchMode::New => match self.host.close_tab(launcher_tab).await {
                Ok(()) => LauncherDisposition::Closed,
                Err(e) => {
                    warn!("Failed to close launcher tab {}: {}", launcher_tab, e);
                    LauncherDisposition::Untouched
                }
            },
            LaunchMode::Current if !ctx.previous_url.is_empty() => {
                match self.host.navigate(launcher_tab, &ctx.previous_url).await {
                    Ok(()) => LauncherDisposition::Restored(ctx.previous_url.clone()),
                    Err(e) => {
                        warn!("Failed to restore launcher tab {}: {}", launcher_tab, e);
                        LauncherDisposition::Untouched
                    }
                }
            }
            LaunchMode::Current => LauncherDisposition::Untouched,
        }
    }
}

/// First tab in host order whose URL starts with `keyword`, skipping the
/// launcher tab itself.
fn first_match<'a>(tabs: &'a [TabInfo], keyword: &str, launcher: Option<&TabId>) -> Option<&'a TabInfo> {
    tabs.iter()
        .find(|tab| tab.url.starts_with(keyword) && Some(&tab.id) != launcher)
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
