//! [`PageDriver`] over a CDP page session.

use std::time::Duration;

use async_trait::async_trait;
use newsfeel_config::TimingConfig;
use tracing::debug;

use super::driver::{BindingCallback, ElementHandle, PageDriver};
use crate::cdp::{CdpError, NetworkIdle, PageSession};

/// A CDP page session plus the waits that make its navigations settle.
pub struct CdpDriver {
    session: PageSession,
    navigation_timeout: Duration,
    network_idle: NetworkIdle,
}

impl CdpDriver {
    pub fn new(session: PageSession, timing: &TimingConfig) -> Self {
        Self {
            session,
            navigation_timeout: timing.navigation_timeout(),
            network_idle: NetworkIdle {
                max_inflight: timing.network_idle_max_inflight,
                quiet: timing.network_idle(),
                timeout: timing.navigation_timeout(),
            },
        }
    }

    /// The underlying session, for raw CDP access.
    pub fn session(&self) -> &PageSession {
        &self.session
    }
}

#[async_trait]
impl PageDriver for CdpDriver {
    async fn url(&self) -> Result<String, CdpError> {
        self.session.get_url().await
    }

    async fn query_all(&self, selector: &str) -> Result<Vec<ElementHandle>, CdpError> {
        let snapshots = self.session.query_all_snapshots(selector).await?;
        Ok(snapshots
            .into_iter()
            .enumerate()
            .map(|(index, snapshot)| ElementHandle {
                selector: selector.to_string(),
                index,
                outer_html: snapshot.outer_html,
                attributes: snapshot.attributes,
            })
            .collect())
    }

    async fn outer_html_without(
        &self,
        element: &ElementHandle,
        ignore: &[String],
    ) -> Result<String, CdpError> {
        self.session
            .outer_html_without_nth(&element.selector, element.index, ignore)
            .await
    }

    async fn click(&self, element: &ElementHandle) -> Result<(), CdpError> {
        debug!("Clicking {}[{}]", element.selector, element.index);
        self.session.click_nth(&element.selector, element.index).await
    }

    async fn set_value(&self, element: &ElementHandle, value: &str) -> Result<(), CdpError> {
        self.session
            .set_value_nth(&element.selector, element.index, value)
            .await
    }

    async fn remove_all(&self, selector: &str) -> Result<usize, CdpError> {
        self.session.remove_all(selector).await
    }

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<(), CdpError> {
        self.session.wait_for_selector(selector, timeout).await
    }

    async fn navigate(&self, url: &str) -> Result<(), CdpError> {
        self.session.navigate(url, self.navigation_timeout).await?;
        self.session.wait_for_network_idle(self.network_idle).await
    }

    async fn reload(&self) -> Result<(), CdpError> {
        self.session.reload(self.navigation_timeout).await?;
        self.session.wait_for_network_idle(self.network_idle).await
    }

    fn has_binding(&self, name: &str) -> bool {
        self.session.has_binding(name)
    }

    async fn add_binding(&self, name: &str, callback: BindingCallback) -> Result<(), CdpError> {
        self.session.add_binding(name, callback).await
    }

    async fn close(&self) -> Result<(), CdpError> {
        self.session.close_target().await
    }
}
