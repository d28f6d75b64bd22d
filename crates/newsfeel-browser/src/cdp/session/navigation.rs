//! Navigation and readiness waits for CDP page session.

use std::time::Duration;

use serde_json::json;
use tokio::time::Instant;
use tracing::debug;

use crate::cdp::error::CdpError;

use super::core::PageSession;

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const NETWORK_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Network-quiescence criterion: at most `max_inflight` requests for `quiet`,
/// given up after `timeout`.
#[derive(Debug, Clone, Copy)]
pub struct NetworkIdle {
    pub max_inflight: usize,
    pub quiet: Duration,
    pub timeout: Duration,
}

impl PageSession {
    /// Navigate to `url` and wait until the document has loaded.
    pub async fn navigate(&self, url: &str, timeout: Duration) -> Result<String, CdpError> {
        self.network.lock().restart_window(Instant::now());

        let result = self
            .call("Page.navigate", Some(json!({"url": url})))
            .await?;

        if let Some(error) = result.get("errorText") {
            return Err(CdpError::NavigationFailed(format!(
                "{}: {}",
                url,
                error.as_str().unwrap_or("Unknown error")
            )));
        }

        let frame_id = result["frameId"].as_str().unwrap_or("main").to_string();

        self.wait_for_load(timeout).await?;

        debug!("Navigated to {}", url);
        Ok(frame_id)
    }

    /// Wait for `document.readyState` to settle.
    pub async fn wait_for_load(&self, timeout: Duration) -> Result<(), CdpError> {
        let start = Instant::now();

        loop {
            let result = self.evaluate("document.readyState").await?;

            if let Some(state) = result.as_str() {
                if state == "complete" || state == "interactive" {
                    return Ok(());
                }
            }

            if start.elapsed() > timeout {
                return Err(CdpError::Timeout("Page load timeout".to_string()));
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Wait until the network has been quiet for the requested window.
    pub async fn wait_for_network_idle(&self, idle: NetworkIdle) -> Result<(), CdpError> {
        let deadline = Instant::now() + idle.timeout;
        self.network
            .lock()
            .set_max_inflight(idle.max_inflight, Instant::now());

        loop {
            let now = Instant::now();
            let quiet = self.network.lock().quiet_for(now);
            if quiet.is_some_and(|q| q >= idle.quiet) {
                return Ok(());
            }

            if now >= deadline {
                let inflight = self.network.lock().inflight();
                return Err(CdpError::Timeout(format!(
                    "Network not idle, {} requests in flight",
                    inflight
                )));
            }

            tokio::time::sleep(NETWORK_POLL_INTERVAL).await;
        }
    }

    /// Reload page.
    pub async fn reload(&self, timeout: Duration) -> Result<(), CdpError> {
        self.network.lock().restart_window(Instant::now());
        self.call("Page.reload", None).await?;
        self.wait_for_load(timeout).await?;
        Ok(())
    }

    /// Get current URL.
    pub async fn get_url(&self) -> Result<String, CdpError> {
        let result = self.evaluate("window.location.href").await?;
        Ok(result.as_str().unwrap_or("").to_string())
    }

    /// Wait for `selector` to match at least one element.
    pub async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<(), CdpError> {
        let start = Instant::now();

        loop {
            if self.selector_exists(selector).await? {
                return Ok(());
            }

            if start.elapsed() > timeout {
                return Err(CdpError::Timeout(format!(
                    "Waiting for selector '{}' timed out",
                    selector
                )));
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}
