//! The page-capability trait extraction and automation compose over.

use std::time::Duration;

use async_trait::async_trait;

use crate::cdp::{BindingFn, CdpError};

/// Host callback reachable from page script as `window[name](payload)`.
pub type BindingCallback = BindingFn;

/// One element matched by a selector.
///
/// Carries the outer HTML and attributes as they were when queried; actions
/// resolve the element again by `selector` and `index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementHandle {
    pub selector: String,
    pub index: usize,
    pub outer_html: String,
    pub attributes: Vec<(String, String)>,
}

impl ElementHandle {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.as_str())
    }
}

/// What a loaded document can do.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Current document URL.
    async fn url(&self) -> Result<String, CdpError>;

    /// Every element matching `selector`, in document order.
    async fn query_all(&self, selector: &str) -> Result<Vec<ElementHandle>, CdpError>;

    /// Outer HTML of `element` with every descendant subtree matching one of
    /// `ignore` left out. Selectors match against the whole document.
    async fn outer_html_without(
        &self,
        element: &ElementHandle,
        ignore: &[String],
    ) -> Result<String, CdpError>;

    async fn click(&self, element: &ElementHandle) -> Result<(), CdpError>;

    async fn set_value(&self, element: &ElementHandle, value: &str) -> Result<(), CdpError>;

    /// Remove every element matching `selector`; returns the count removed.
    async fn remove_all(&self, selector: &str) -> Result<usize, CdpError>;

    /// Wait until `selector` matches, failing with `CdpError::Timeout`.
    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<(), CdpError>;

    /// Navigate and wait for the page to settle.
    async fn navigate(&self, url: &str) -> Result<(), CdpError>;

    /// Reload and wait for the page to settle.
    async fn reload(&self) -> Result<(), CdpError>;

    fn has_binding(&self, name: &str) -> bool;

    async fn add_binding(&self, name: &str, callback: BindingCallback) -> Result<(), CdpError>;

    /// Close the underlying target.
    async fn close(&self) -> Result<(), CdpError>;
}
