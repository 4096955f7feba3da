//! Tab host doubles shared by the dispatcher and trigger tests.

use std::sync::Mutex;

use async_trait::async_trait;
use mockall::mock;

use launcher_protocols::{TabError, TabHost, TabId, TabInfo, WindowId};

mock! {
    pub Host {}

    #[async_trait]
    impl TabHost for Host {
        async fn query_tabs(&self) -> Result<Vec<TabInfo>, TabError>;
        async fn active_tab(&self) -> Result<Option<TabInfo>, TabError>;
        async fn focus_window(&self, window: &WindowId) -> Result<(), TabError>;
        async fn activate_tab(&self, tab: &TabId) -> Result<(), TabError>;
        async fn navigate(&self, tab: &TabId, url: &str) -> Result<(), TabError>;
        async fn close_tab(&self, tab: &TabId) -> Result<(), TabError>;
        async fn create_tab(&self, url: &str) -> Result<TabId, TabError>;
    }
}

/// One recorded tab call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Query,
    Active,
    Focus(String),
    Activate(String),
    Navigate(String, String),
    Close(String),
    Create(String),
}

/// In-memory browser that records every call in order.
pub struct FakeHost {
    tabs: Vec<TabInfo>,
    calls: Mutex<Vec<Call>>,
    fail_query: bool,
    fail_focus: bool,
}

impl FakeHost {
    pub fn new(tabs: Vec<TabInfo>) -> Self {
        Self {
            tabs,
            calls: Mutex::new(Vec::new()),
            fail_query: false,
            fail_focus: false,
        }
    }

    pub fn failing_query(mut self) -> Self {
        self.fail_query = true;
        self
    }

    pub fn failing_focus(mut self) -> Self {
        self.fail_focus = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

pub fn tab(id: &str, window: Option<&str>, url: &str) -> TabInfo {
    TabInfo {
        id: TabId::new(id),
        window_id: window.map(WindowId::new),
        url: url.to_string(),
        active: false,
    }
}

#[async_trait]
impl TabHost for FakeHost {
    async fn query_tabs(&self) -> Result<Vec<TabInfo>, TabError> {
        self.record(Call::Query);
        if self.fail_query {
            return Err(TabError::PermissionDenied("tabs".to_string()));
        }
        Ok(self.tabs.clone())
    }

    async fn active_tab(&self) -> Result<Option<TabInfo>, TabError> {
        self.record(Call::Active);
        Ok(self.tabs.iter().find(|t| t.active).cloned())
    }

    async fn focus_window(&self, window: &WindowId) -> Result<(), TabError> {
        self.record(Call::Focus(window.to_string()));
        if self.fail_focus {
            return Err(TabError::WindowNotFound(window.to_string()));
        }
        Ok(())
    }

    async fn activate_tab(&self, tab: &TabId) -> Result<(), TabError> {
        self.record(Call::Activate(tab.to_string()));
        Ok(())
    }

    async fn navigate(&self, tab: &TabId, url: &str) -> Result<(), TabError> {
        self.record(Call::Navigate(tab.to_string(), url.to_string()));
        Ok(())
    }

    async fn close_tab(&self, tab: &TabId) -> Result<(), TabError> {
        self.record(Call::Close(tab.to_string()));
        Ok(())
    }

    async fn create_tab(&self, url: &str) -> Result<TabId, TabError> {
        self.record(Call::Create(url.to_string()));
        Ok(TabId::new(format!("new-{}", self.calls.lock().unwrap().len())))
    }
}
