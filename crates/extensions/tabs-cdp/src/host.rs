//! [`TabHost`] over CDP.
//!
//! Tab ids are CDP target ids; window ids are the browser's numeric window
//! ids rendered as strings.

use async_trait::async_trait;
use tracing::debug;

use launcher_protocols::{TabError, TabHost, TabId, TabInfo, WindowId};

use crate::cdp::{CdpClient, CdpError, WindowBounds, WindowState};

impl From<CdpError> for TabError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::TargetNotFound(id) => TabError::NotFound(id),
            CdpError::Protocol { message, .. } if message.contains("No target") => {
                TabError::NotFound(message)
            }
            CdpError::Protocol { message, .. } if message.contains("No window") => {
                TabError::WindowNotFound(message)
            }
            e @ (CdpError::BrowserNotAvailable(_)
            | CdpError::ConnectionFailed(_)
            | CdpError::WebSocket(_)
            | CdpError::SessionClosed) => TabError::Unavailable(e.to_string()),
            other => TabError::NavigationFailed(other.to_string()),
        }
    }
}

pub struct CdpTabHost {
    client: CdpClient,
}

impl CdpTabHost {
    pub fn new(client: CdpClient) -> Self {
        Self { client }
    }

    /// Connect to the DevTools endpoint (e.g. `http://127.0.0.1:9222`).
    pub async fn connect(endpoint: &str) -> Result<Self, CdpError> {
        Ok(Self::new(CdpClient::connect(endpoint).await?))
    }

    async fn window_of(&self, target_id: &str) -> Option<WindowId> {
        match self.client.window_for_target(target_id).await {
            Ok(window) => Some(WindowId::new(window.window_id.to_string())),
            Err(e) => {
                debug!("No window for target {}: {}", target_id, e);
                None
            }
        }
    }
}

#[async_trait]
impl TabHost for CdpTabHost {
    async fn query_tabs(&self) -> Result<Vec<TabInfo>, TabError> {
        let targets = self.client.get_targets().await?;
        let mut tabs = Vec::new();
        for target in targets.into_iter().filter(|t| t.is_page()) {
            let window_id = self.window_of(&target.target_id).await;
            tabs.push(TabInfo {
                id: TabId::new(target.target_id),
                window_id,
                url: target.url,
                active: false,
            });
        }
        Ok(tabs)
    }

    async fn active_tab(&self) -> Result<Option<TabInfo>, TabError> {
        let Some(page) = self.client.list_pages().await?.into_iter().next() else {
            return Ok(None);
        };
        let window_id = self.window_of(&page.id).await;
        Ok(Some(TabInfo {
            id: TabId::new(page.id),
            window_id,
            url: page.url,
            active: true,
        }))
    }

    async fn focus_window(&self, window: &WindowId) -> Result<(), TabError> {
        let window_id: i64 = window
            .to_string()
            .parse()
            .map_err(|_| TabError::WindowNotFound(window.to_string()))?;
        // Activating a target raises its window; a minimized one must be restored first.
        let current = self.client.window_bounds(window_id).await?;
        if current.window_state == Some(WindowState::Minimized) {
            let bounds = WindowBounds {
                window_state: Some(WindowState::Normal),
            };
            self.client.set_window_bounds(window_id, &bounds).await?;
        }
        Ok(())
    }

    async fn activate_tab(&self, tab: &TabId) -> Result<(), TabError> {
        self.client.activate_target(tab.as_str()).await?;
        Ok(())
    }

    async fn navigate(&self, tab: &TabId, url: &str) -> Result<(), TabError> {
        self.client.navigate_target(tab.as_str(), url).await?;
        Ok(())
    }

    async fn close_tab(&self, tab: &TabId) -> Result<(), TabError> {
        self.client.close_target(tab.as_str()).await?;
        Ok(())
    }

    async fn create_tab(&self, url: &str) -> Result<TabId, TabError> {
        let id = self.client.create_target(url).await?;
        Ok(TabId::new(id))
    }
}
