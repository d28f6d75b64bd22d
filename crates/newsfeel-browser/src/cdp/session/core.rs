//! Core session struct, CDP command dispatch and the event pump.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, trace, warn};

use crate::cdp::client::Transport;
use crate::cdp::error::CdpError;
use crate::cdp::protocol::{BindingCalled, CdpResponse, NetworkRequestEvent};

use super::bindings::BindingFn;
use super::network::NetworkTracker;

pub(super) type Bindings = Arc<Mutex<HashMap<String, BindingFn>>>;

/// Idle threshold used until a caller asks for a different one.
const DEFAULT_MAX_INFLIGHT: usize = 2;

/// A session attached to a single page target.
pub struct PageSession {
    /// Target ID.
    pub(super) target_id: String,
    /// Session ID for this target.
    pub(super) session_id: String,
    /// Connection shared with the client.
    pub(super) transport: Arc<Transport>,
    /// In-flight request bookkeeping, fed by the event pump.
    pub(super) network: Arc<Mutex<NetworkTracker>>,
    /// Exposed functions by binding name.
    pub(super) bindings: Bindings,
    pump: tokio::task::JoinHandle<()>,
}

impl PageSession {
    /// Create a new page session and start its event pump.
    pub(crate) fn new(
        target_id: String,
        session_id: String,
        transport: Arc<Transport>,
        event_rx: mpsc::UnboundedReceiver<CdpResponse>,
    ) -> Self {
        let network = Arc::new(Mutex::new(NetworkTracker::new(
            DEFAULT_MAX_INFLIGHT,
            Instant::now(),
        )));
        let bindings: Bindings = Arc::new(Mutex::new(HashMap::new()));

        let pump = {
            let network = network.clone();
            let bindings = bindings.clone();
            tokio::spawn(async move {
                Self::event_pump(event_rx, network, bindings).await;
            })
        };

        Self {
            target_id,
            session_id,
            transport,
            network,
            bindings,
            pump,
        }
    }

    /// Get target ID.
    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    /// Get session ID.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Send a CDP command to this page session.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.transport
            .call(method, params, Some(&self.session_id))
            .await
    }

    /// Enable required CDP domains.
    pub(crate) async fn enable_domains(&self) -> Result<(), CdpError> {
        self.call("Page.enable", None).await?;
        self.call("Runtime.enable", None).await?;
        self.call("Network.enable", None).await?;

        debug!("Enabled CDP domains for session {}", self.session_id);
        Ok(())
    }

    /// Register a script that runs in every new document before its own
    /// scripts.
    pub async fn add_script_on_new_document(&self, source: &str) -> Result<(), CdpError> {
        self.call(
            "Page.addScriptToEvaluateOnNewDocument",
            Some(json!({"source": source})),
        )
        .await?;
        Ok(())
    }

    /// Close this target.
    pub async fn close_target(&self) -> Result<(), CdpError> {
        self.transport
            .call(
                "Target.closeTarget",
                Some(json!({"targetId": self.target_id})),
                None,
            )
            .await?;
        debug!("Closed target {}", self.target_id);
        Ok(())
    }

    async fn event_pump(
        mut event_rx: mpsc::UnboundedReceiver<CdpResponse>,
        network: Arc<Mutex<NetworkTracker>>,
        bindings: Bindings,
    ) {
        while let Some(event) = event_rx.recv().await {
            Self::dispatch_event(event, &network, &bindings);
        }
        trace!("Event pump finished");
    }

    /// Route one event to the network tracker or an exposed function.
    pub(super) fn dispatch_event(
        event: CdpResponse,
        network: &Mutex<NetworkTracker>,
        bindings: &Bindings,
    ) {
        let (Some(method), Some(params)) = (event.method, event.params) else {
            return;
        };

        match method.as_str() {
            "Network.requestWillBeSent" => {
                if let Ok(req) = serde_json::from_value::<NetworkRequestEvent>(params) {
                    network.lock().request_started(req.request_id, Instant::now());
                }
            }
            "Network.loadingFinished" | "Network.loadingFailed" => {
                if let Ok(req) = serde_json::from_value::<NetworkRequestEvent>(params) {
                    network.lock().request_finished(&req.request_id, Instant::now());
                }
            }
            "Runtime.bindingCalled" => match serde_json::from_value::<BindingCalled>(params) {
                Ok(call) => {
                    let callback = bindings.lock().get(&call.name).cloned();
                    match callback {
                        Some(callback) => callback(call.payload),
                        None => debug!("No exposed function named {}", call.name),
                    }
                }
                Err(e) => warn!("Malformed Runtime.bindingCalled event: {}", e),
            },
            _ => {}
        }
    }
}

impl Drop for PageSession {
    fn drop(&mut self) {
        self.pump.abort();
    }
}
