//! Page-to-host function bindings.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use crate::cdp::error::CdpError;

use super::core::PageSession;

/// Host callback behind `window[name](payload)`. Runs on the session's
/// event pump, so it should return quickly.
pub type BindingFn = Arc<dyn Fn(String) + Send + Sync>;

impl PageSession {
    /// Whether `name` is already bound on this session.
    pub fn has_binding(&self, name: &str) -> bool {
        self.bindings.lock().contains_key(name)
    }

    /// Make `window[name](payload)` call `callback` with the string payload.
    ///
    /// The binding survives navigations within this target.
    pub async fn add_binding(&self, name: &str, callback: BindingFn) -> Result<(), CdpError> {
        self.call("Runtime.addBinding", Some(json!({"name": name})))
            .await?;
        self.bindings.lock().insert(name.to_string(), callback);
        debug!("Exposed function {} on target {}", name, self.target_id);
        Ok(())
    }
}
