//! CDP WebSocket client.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, trace, warn};

use super::error::CdpError;
use super::protocol::{BrowserVersion, CdpRequest, CdpResponse, PageInfo, TargetInfo, WindowBounds, WindowForTarget};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;

type PendingMap = Arc<Mutex<HashMap<u64, oneshot::Sender<Result<Value, CdpError>>>>>;

/// Browser-level CDP connection.
///
/// Requests are matched to responses by id; there is no request timeout.
pub struct CdpClient {
    /// HTTP endpoint for page discovery.
    http_endpoint: String,
    ws_tx: tokio::sync::Mutex<WsSink>,
    request_id: AtomicU64,
    pending: PendingMap,
    _recv_task: tokio::task::JoinHandle<()>,
}

impl CdpClient {
    /// Connect to the browser at `endpoint` (e.g. `http://127.0.0.1:9222`).
    pub async fn connect(endpoint: &str) -> Result<Self, CdpError> {
        let http_endpoint = endpoint.trim_end_matches('/').to_string();

        let version_url = format!("{}/json/version", http_endpoint);
        debug!("Fetching browser version from {}", version_url);

        let version: BrowserVersion = reqwest::get(&version_url)
            .await
            .map_err(|e| CdpError::BrowserNotAvailable(format!("{}: {}", endpoint, e)))?
            .json()
            .await
            .map_err(|e| CdpError::BrowserNotAvailable(format!("{}: {}", endpoint, e)))?;

        debug!("Connected to browser: {}", version.browser);

        let (ws_stream, _) = tokio_tungstenite::connect_async(&version.web_socket_debugger_url)
            .await
            .map_err(|e| CdpError::ConnectionFailed(format!("WebSocket: {}", e)))?;

        let (ws_sink, ws_source) = ws_stream.split();
        let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));

        let recv_task = {
            let pending = pending.clone();
            tokio::spawn(async move {
                Self::receive_loop(ws_source, pending).await;
            })
        };

        debug!("CDP client connected to {}", version.web_socket_debugger_url);

        Ok(Self {
            http_endpoint,
            ws_tx: tokio::sync::Mutex::new(ws_sink),
            request_id: AtomicU64::new(1),
            pending,
            _recv_task: recv_task,
        })
    }

    async fn receive_loop(mut ws_source: WsSource, pending: PendingMap) {
        while let Some(msg) = ws_source.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    trace!("CDP recv: {}", text);
                    match serde_json::from_str::<CdpResponse>(&text) {
                        Ok(resp) => Self::complete(&pending, resp),
                        Err(e) => warn!("Failed to parse CDP message: {}", e),
                    }
                }
                Ok(Message::Close(_)) => {
                    debug!("WebSocket closed");
                    break;
                }
                Err(e) => {
                    error!("WebSocket error: {}", e);
                    break;
                }
                _ => {}
            }
        }

        // Wake anyone still waiting; dropping the senders yields SessionClosed.
        pending.lock().clear();
    }

    /// Hand a response to the request waiting for it. Events are dropped.
    fn complete(pending: &PendingMap, resp: CdpResponse) {
        let Some(id) = resp.id else {
            trace!("Ignoring CDP event {:?}", resp.method);
            return;
        };
        let Some(tx) = pending.lock().remove(&id) else {
            debug!("No pending request for CDP response {}", id);
            return;
        };
        let result = match resp.error {
            Some(error) => Err(CdpError::Protocol {
                code: error.code,
                message: error.message,
            }),
            None => Ok(resp.result.unwrap_or(Value::Null)),
        };
        let _ = tx.send(result);
    }

    /// Send a CDP command and wait for its response.
    pub async fn call(
        &self,
        method: &str,
        params: Option<Value>,
        session_id: Option<&str>,
    ) -> Result<Value, CdpError> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);

        let request = CdpRequest {
            id,
            method: method.to_string(),
            params,
            session_id: session_id.map(|s| s.to_string()),
        };

        let json = serde_json::to_string(&request)?;
        trace!("CDP send: {}", json);

        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(id, tx);

        let sent = {
            let mut ws = self.ws_tx.lock().await;
            ws.send(Message::Text(json.into())).await
        };
        if let Err(e) = sent {
            self.pending.lock().remove(&id);
            return Err(e.into());
        }

        rx.await.map_err(|_| CdpError::SessionClosed)?
    }

    // ========================================================================
    // Target Management
    // ========================================================================

    /// Pages from the HTTP endpoint, most recently focused first.
    pub async fn list_pages(&self) -> Result<Vec<PageInfo>, CdpError> {
        let url = format!("{}/json/list", self.http_endpoint);
        let pages: Vec<PageInfo> = reqwest::get(&url).await?.json().await?;
        Ok(pages.into_iter().filter(|p| p.page_type == "page").collect())
    }

    pub async fn get_targets(&self) -> Result<Vec<TargetInfo>, CdpError> {
        let result = self.call("Target.getTargets", None, None).await?;
        let targets: Vec<TargetInfo> = serde_json::from_value(result["targetInfos"].clone())?;
        Ok(targets)
    }

    /// Open a new tab and return its target id.
    pub async fn create_target(&self, url: &str) -> Result<String, CdpError> {
        let result = self
            .call("Target.createTarget", Some(json!({ "url": url })), None)
            .await?;
        result["targetId"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| CdpError::InvalidResponse("Missing targetId".to_string()))
    }

    pub async fn activate_target(&self, target_id: &str) -> Result<(), CdpError> {
        self.call("Target.activateTarget", Some(json!({ "targetId": target_id })), None)
            .await?;
        Ok(())
    }

    pub async fn close_target(&self, target_id: &str) -> Result<(), CdpError> {
        let result = self
            .call("Target.closeTarget", Some(json!({ "targetId": target_id })), None)
            .await?;
        if result["success"].as_bool() == Some(false) {
            return Err(CdpError::TargetNotFound(target_id.to_string()));
        }
        Ok(())
    }

    /// Load `url` in an existing tab through a short-lived session.
    pub async fn navigate_target(&self, target_id: &str, url: &str) -> Result<(), CdpError> {
        let session_id = self.attach(target_id).await?;
        let navigated = self
            .call("Page.navigate", Some(json!({ "url": url })), Some(&session_id))
            .await;
        if let Err(e) = self.detach(&session_id).await {
            debug!("Failed to detach session {}: {}", session_id, e);
        }

        let result = navigated?;
        if let Some(error_text) = result["errorText"].as_str() {
            return Err(CdpError::Protocol {
                code: 0,
                message: error_text.to_string(),
            });
        }
        Ok(())
    }

    async fn attach(&self, target_id: &str) -> Result<String, CdpError> {
        let result = self
            .call(
                "Target.attachToTarget",
                Some(json!({
                    "targetId": target_id,
                    "flatten": true
                })),
                None,
            )
            .await?;

        result["sessionId"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| CdpError::InvalidResponse("Missing sessionId".to_string()))
    }

    async fn detach(&self, session_id: &str) -> Result<(), CdpError> {
        self.call(
            "Target.detachFromTarget",
            Some(json!({ "sessionId": session_id })),
            None,
        )
        .await?;
        Ok(())
    }

    // ========================================================================
    // Windows
    // ========================================================================

    pub async fn window_for_target(&self, target_id: &str) -> Result<WindowForTarget, CdpError> {
        let result = self
            .call("Browser.getWindowForTarget", Some(json!({ "targetId": target_id })), None)
            .await?;
        Ok(serde_json::from_value(result)?)
    }

    pub async fn window_bounds(&self, window_id: i64) -> Result<WindowBounds, CdpError> {
        let result = self
            .call("Browser.getWindowBounds", Some(json!({ "windowId": window_id })), None)
            .await?;
        Ok(serde_json::from_value(result["bounds"].clone())?)
    }

    pub async fn set_window_bounds(&self, window_id: i64, bounds: &WindowBounds) -> Result<(), CdpError> {
        self.call(
            "Browser.setWindowBounds",
            Some(json!({ "windowId": window_id, "bounds": bounds })),
            None,
        )
        .await?;
        Ok(())
    }
}

impl Drop for CdpClient {
    fn drop(&mut self) {
        self._recv_task.abort();
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
