//! Text, attribute, markup and link extraction on a loaded page.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::driver::{BindingCallback, ElementHandle, PageDriver};
use crate::error::PageError;
use crate::extract::{self, AttributeValues};

const DEFAULT_SELECTOR_TIMEOUT: Duration = Duration::from_secs(30);

/// A loaded document.
///
/// Every selector is scoped to the current document. Single-element
/// operations use the first match and fail with
/// [`PageError::NoElementFound`] when there is none.
pub struct BrowserPage {
    driver: Arc<dyn PageDriver>,
    selector_timeout: Duration,
}

impl BrowserPage {
    pub fn new(driver: Arc<dyn PageDriver>) -> Self {
        Self {
            driver,
            selector_timeout: DEFAULT_SELECTOR_TIMEOUT,
        }
    }

    /// Deadline for [`wait_for_selector`](Self::wait_for_selector).
    pub fn with_selector_timeout(mut self, timeout: Duration) -> Self {
        self.selector_timeout = timeout;
        self
    }

    pub fn driver(&self) -> &Arc<dyn PageDriver> {
        &self.driver
    }

    pub async fn url(&self) -> Result<String, PageError> {
        Ok(self.driver.url().await?)
    }

    /// `scheme://host[:port]` of the current URL, `None` for opaque origins.
    pub async fn origin(&self) -> Result<Option<String>, PageError> {
        Ok(extract::origin_of(&self.url().await?))
    }

    pub async fn get_handle_single(&self, selector: &str) -> Result<ElementHandle, PageError> {
        match self.driver.query_all(selector).await?.into_iter().next() {
            Some(handle) => Ok(handle),
            None => Err(self.no_element_found(selector).await),
        }
    }

    /// Every match in document order; empty when nothing matches.
    pub async fn get_handles_all(&self, selector: &str) -> Result<Vec<ElementHandle>, PageError> {
        Ok(self.driver.query_all(selector).await?)
    }

    /// Visible text of the first match with `ignore_selectors` subtrees left
    /// out and whitespace collapsed.
    ///
    /// Ignore selectors are matched in the page, against the whole document.
    pub async fn extract_text(
        &self,
        selector: &str,
        ignore_selectors: &[&str],
    ) -> Result<String, PageError> {
        let ignore = checked_selectors(ignore_selectors)?;
        let handle = self.get_handle_single(selector).await?;
        self.text_of(&handle, &ignore).await
    }

    /// Like [`extract_text`](Self::extract_text) for every match, joined
    /// with `separator`.
    pub async fn extract_text_multiple(
        &self,
        selector: &str,
        ignore_selectors: &[&str],
        separator: &str,
    ) -> Result<String, PageError> {
        let ignore = checked_selectors(ignore_selectors)?;
        let handles = self.get_handles_all(selector).await?;
        if handles.is_empty() {
            return Err(self.no_element_found(selector).await);
        }
        let mut texts = Vec::with_capacity(handles.len());
        for handle in &handles {
            texts.push(self.text_of(handle, &ignore).await?);
        }
        Ok(texts.join(separator))
    }

    async fn text_of(&self, handle: &ElementHandle, ignore: &[String]) -> Result<String, PageError> {
        if ignore.is_empty() {
            return Ok(extract::visible_text(&handle.outer_html));
        }
        let markup = self.driver.outer_html_without(handle, ignore).await?;
        Ok(extract::visible_text(&markup))
    }

    pub async fn extract_attributes(
        &self,
        selector: &str,
        attribute_names: &[&str],
    ) -> Result<AttributeValues, PageError> {
        let handle = self.get_handle_single(selector).await?;
        Ok(extract::attribute_values(&handle.attributes, attribute_names))
    }

    /// Outgoing links of the first match, made absolute against this page.
    pub async fn extract_links(
        &self,
        selector: &str,
        ignore_list: &[&str],
    ) -> Result<Vec<String>, PageError> {
        let handle = self.get_handle_single(selector).await?;
        let url = self.url().await?;
        let hrefs = extract::anchor_hrefs(&handle.outer_html);
        Ok(extract::normalize_links(hrefs, ignore_list, &url))
    }

    /// Markup of the first match, including its own tag.
    pub async fn extract_html(&self, selector: &str) -> Result<String, PageError> {
        Ok(self.get_handle_single(selector).await?.outer_html)
    }

    /// Make `window[name](payload)` call `callback` on the host.
    ///
    /// Re-exposing a name is a no-op when `exists_ok`, an error otherwise.
    pub async fn expose_function<F>(
        &self,
        name: &str,
        callback: F,
        exists_ok: bool,
    ) -> Result<(), PageError>
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        if self.driver.has_binding(name) {
            if exists_ok {
                return Ok(());
            }
            return Err(PageError::FunctionAlreadyExposed {
                url: self.url().await?,
                name: name.to_string(),
            });
        }
        let callback: BindingCallback = Arc::new(callback);
        Ok(self.driver.add_binding(name, callback).await?)
    }

    pub async fn click(&self, handle: &ElementHandle) -> Result<(), PageError> {
        Ok(self.driver.click(handle).await?)
    }

    pub async fn set_value(&self, handle: &ElementHandle, value: &str) -> Result<(), PageError> {
        Ok(self.driver.set_value(handle, value).await?)
    }

    pub async fn wait_for_selector(&self, selector: &str) -> Result<(), PageError> {
        Ok(self
            .driver
            .wait_for_selector(selector, self.selector_timeout)
            .await?)
    }

    pub async fn navigate(&self, url: &str) -> Result<(), PageError> {
        Ok(self.driver.navigate(url).await?)
    }

    /// Reload and wait for the network to go quiet.
    pub async fn refresh(&self) -> Result<(), PageError> {
        Ok(self.driver.reload().await?)
    }

    /// Remove every `iframe` from the document.
    pub async fn remove_all_iframes(&self) -> Result<usize, PageError> {
        let removed = self.driver.remove_all("iframe").await?;
        debug!("Removed {} iframes", removed);
        Ok(removed)
    }

    /// Leave the document for `about:blank`, then close the target.
    pub async fn close(&self) -> Result<(), PageError> {
        self.driver.navigate("about:blank").await?;
        Ok(self.driver.close().await?)
    }

    async fn no_element_found(&self, selector: &str) -> PageError {
        let url = match self.driver.url().await {
            Ok(url) => url,
            Err(_) => "<unknown>".to_string(),
        };
        PageError::NoElementFound {
            url,
            selector: selector.to_string(),
        }
    }
}

/// Reject malformed selectors before anything runs in the page.
fn checked_selectors(selectors: &[&str]) -> Result<Vec<String>, PageError> {
    extract::parse_selectors(selectors)?;
    Ok(selectors.iter().map(|s| s.to_string()).collect())
}

#[cfg(test)]
#[path = "browser_page_tests.rs"]
mod tests;
