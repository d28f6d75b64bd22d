//! Adblock Plus options page automation.

use std::time::Duration;

use tracing::{debug, info};

use crate::error::PageError;
use crate::page::BrowserPage;

/// Selectors of the Adblock Plus 3.x options page.
pub mod selectors {
    pub const ACCEPTABLE_ADS: &str = r#"button[id="acceptable-ads-allow"]"#;
    pub const ADVANCED_TAB: &str = r#"a[id="tab-advanced"]"#;
    pub const FILTER_LISTS_TABLE: &str = "ul[id=all-filter-lists-table]";
    pub const IMPORT_DIALOG: &str = "div[id=filterlist-by-url]";
    pub const IMPORT_URL_INPUT: &str = r#"input[id="import-list-url"]"#;
    pub const IMPORT_VALIDATE: &str = r#"button[data-action="validate-import-subscription"]"#;
    pub const UPDATE_ALL: &str = r#"button[id="update"]"#;

    /// Labels of the privacy lists toggled on by `enable_all_anti_tracking_options`.
    pub const ANTI_TRACKING_LABELS: [&str; 4] = [
        "Block additional tracking",
        "Block cookie warnings",
        "Block push notifications",
        "Block social media icons tracking",
    ];

    /// Toggle button of the privacy list labelled `label`.
    pub fn anti_tracking_toggle(label: &str) -> String {
        format!(
            r#"li[aria-label="{}"]>button[data-action="toggle-remove-subscription"]"#,
            label
        )
    }
}

/// Drives the extension's options page.
///
/// Holds the page it runs on; extraction stays reachable through
/// [`page`](Self::page).
pub struct SettingsPage {
    page: BrowserPage,
    is_advanced: bool,
    update_settle: Duration,
}

impl SettingsPage {
    pub fn new(page: BrowserPage, update_settle: Duration) -> Self {
        Self {
            page,
            is_advanced: false,
            update_settle,
        }
    }

    pub fn page(&self) -> &BrowserPage {
        &self.page
    }

    /// Whether the advanced tab has been opened. Never goes back to `false`.
    pub fn is_advanced(&self) -> bool {
        self.is_advanced
    }

    /// Bring an `aria-checked` control to `value` (`"true"` or `"false"`),
    /// clicking only when its state differs.
    pub async fn set_checkbox(&self, selector: &str, value: &str) -> Result<(), PageError> {
        if value != "true" && value != "false" {
            return Err(PageError::InvalidCheckboxValue(value.to_string()));
        }

        let handle = self.page.get_handle_single(selector).await?;
        if handle.attribute("aria-checked") == Some(value) {
            debug!("{} already {}", selector, value);
            return Ok(());
        }

        debug!("Toggling {} to {}", selector, value);
        self.page.click(&handle).await
    }

    pub async fn disable_acceptable_ads(&self) -> Result<(), PageError> {
        self.set_checkbox(selectors::ACCEPTABLE_ADS, "false").await
    }

    pub async fn enable_all_anti_tracking_options(&self) -> Result<(), PageError> {
        for label in selectors::ANTI_TRACKING_LABELS {
            self.set_checkbox(&selectors::anti_tracking_toggle(label), "true")
                .await?;
        }
        Ok(())
    }

    pub async fn go_to_advanced_tab(&mut self) -> Result<(), PageError> {
        let tab = self.page.get_handle_single(selectors::ADVANCED_TAB).await?;
        self.page.click(&tab).await?;
        self.is_advanced = true;
        Ok(())
    }

    /// Whether exactly one entry of the filter-list table matches `selector`.
    pub async fn filter_list_present(&self, selector: &str) -> Result<bool, PageError> {
        Ok(self.page.get_handles_all(selector).await?.len() == 1)
    }

    /// Subscribe to the list at `url` unless an entry matching `selector`
    /// already exists. Returns whether a subscription was added.
    pub async fn add_filter_list(&mut self, selector: &str, url: &str) -> Result<bool, PageError> {
        self.ensure_advanced().await?;
        self.page
            .wait_for_selector(selectors::FILTER_LISTS_TABLE)
            .await?;

        if self.filter_list_present(selector).await? {
            debug!("Filter list {} already subscribed", selector);
            return Ok(false);
        }

        self.page.wait_for_selector(selectors::IMPORT_DIALOG).await?;
        let input = self
            .page
            .get_handle_single(selectors::IMPORT_URL_INPUT)
            .await?;
        self.page.set_value(&input, url).await?;

        let validate = self
            .page
            .get_handle_single(selectors::IMPORT_VALIDATE)
            .await?;
        self.page.click(&validate).await?;

        self.page.wait_for_selector(selector).await?;
        info!("Subscribed to filter list {}", url);
        Ok(true)
    }

    /// Trigger an update of every subscribed list and give it time to run.
    pub async fn update_all_filter_lists(&mut self) -> Result<(), PageError> {
        self.ensure_advanced().await?;
        let update = self.page.get_handle_single(selectors::UPDATE_ALL).await?;
        self.page.click(&update).await?;

        debug!("Waiting {:?} for filter lists to update", self.update_settle);
        tokio::time::sleep(self.update_settle).await;
        Ok(())
    }

    async fn ensure_advanced(&mut self) -> Result<(), PageError> {
        if !self.is_advanced {
            self.go_to_advanced_tab().await?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
