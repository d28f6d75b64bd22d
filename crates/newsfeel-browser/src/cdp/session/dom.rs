//! DOM operations for CDP page session.
//!
//! Elements are addressed by selector plus document-order index and resolved
//! again on every action.

use serde::Deserialize;
use serde_json::Value;

use crate::cdp::error::CdpError;

use super::core::PageSession;
use super::js::js_string;

/// One matched element as read in the page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSnapshot {
    pub outer_html: String,
    /// Attribute name/value pairs in source order.
    pub attributes: Vec<(String, String)>,
}

impl PageSession {
    /// Every element matching `selector`, in document order.
    pub async fn query_all_snapshots(&self, selector: &str) -> Result<Vec<ElementSnapshot>, CdpError> {
        let expression = format!(
            "Array.from(document.querySelectorAll({}), el => ({{ \
             outerHtml: el.outerHTML, \
             attributes: el.getAttributeNames().map(name => [name, el.getAttribute(name)]) }}))",
            js_string(selector)
        );
        let value = self.evaluate(&expression).await?;
        let snapshots: Vec<ElementSnapshot> = serde_json::from_value(value)?;
        Ok(snapshots)
    }

    /// Outer HTML of the `index`-th match of `selector` with every descendant
    /// subtree that matches one of `ignore` left out.
    ///
    /// Matching runs on the live element, so selectors may refer to its
    /// ancestors and siblings. The page itself is not modified.
    pub async fn outer_html_without_nth(
        &self,
        selector: &str,
        index: usize,
        ignore: &[String],
    ) -> Result<String, CdpError> {
        let expression = format!(
            "(() => {{ const el = document.querySelectorAll({})[{}]; if (!el) return null; \
             const ignore = {}; const copy = el.cloneNode(true); \
             const prune = (live, twin) => {{ \
               const twins = Array.from(twin.children); \
               Array.from(live.children).forEach((child, i) => {{ \
                 if (ignore.some(sel => child.matches(sel))) {{ twins[i].remove(); }} \
                 else {{ prune(child, twins[i]); }} \
               }}); \
             }}; \
             prune(el, copy); return copy.outerHTML; }})()",
            js_string(selector),
            index,
            serde_json::to_string(ignore)?
        );
        match self.evaluate(&expression).await? {
            Value::String(html) => Ok(html),
            _ => Err(CdpError::ElementNotFound(selector.to_string())),
        }
    }

    /// Whether at least one element matches `selector`.
    pub async fn selector_exists(&self, selector: &str) -> Result<bool, CdpError> {
        let expression = format!("document.querySelector({}) !== null", js_string(selector));
        Ok(self.evaluate(&expression).await?.as_bool().unwrap_or(false))
    }

    /// Click the `index`-th match of `selector`.
    pub async fn click_nth(&self, selector: &str, index: usize) -> Result<(), CdpError> {
        let expression = format!(
            "(() => {{ const el = document.querySelectorAll({})[{}]; if (!el) return false; el.click(); return true; }})()",
            js_string(selector),
            index
        );
        self.expect_element(&expression, selector).await
    }

    /// Set the value of the `index`-th match of `selector` and fire the
    /// `input` and `change` events a user edit would.
    pub async fn set_value_nth(
        &self,
        selector: &str,
        index: usize,
        value: &str,
    ) -> Result<(), CdpError> {
        let expression = format!(
            "(() => {{ const el = document.querySelectorAll({})[{}]; if (!el) return false; el.value = {}; \
             el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
             el.dispatchEvent(new Event('change', {{ bubbles: true }})); return true; }})()",
            js_string(selector),
            index,
            js_string(value)
        );
        self.expect_element(&expression, selector).await
    }

    /// Remove every element matching `selector`; returns how many went.
    pub async fn remove_all(&self, selector: &str) -> Result<usize, CdpError> {
        let expression = format!(
            "(() => {{ const els = document.querySelectorAll({}); els.forEach(el => el.remove()); return els.length; }})()",
            js_string(selector)
        );
        let removed = self.evaluate(&expression).await?.as_u64().unwrap_or(0);
        Ok(removed as usize)
    }

    async fn expect_element(&self, expression: &str, selector: &str) -> Result<(), CdpError> {
        if self.evaluate(expression).await?.as_bool() == Some(true) {
            Ok(())
        } else {
            Err(CdpError::ElementNotFound(selector.to_string()))
        }
    }
}
