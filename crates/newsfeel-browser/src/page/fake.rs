//! In-memory [`PageDriver`] for tests.
//!
//! Elements are keyed by the exact selector string they are queried with.
//! Selectors with no keyed element fall back to a full document, when one is
//! set, so document-wide selector matching can be exercised too.
//! Clicking an element that carries `aria-checked` flips it, and clicks can be
//! scripted to make new elements appear, one queued element per click.

use std::collections::{HashMap, HashSet, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use scraper::{ElementRef, Html, Selector};

use super::driver::{BindingCallback, ElementHandle, PageDriver};
use crate::cdp::CdpError;
use crate::extract;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    Click(String),
    SetValue(String, String),
    RemoveAll(String),
    Navigate(String),
    Reload,
    AddBinding(String),
    Close,
}

#[derive(Default)]
struct FakeState {
    url: String,
    document: Option<String>,
    elements: HashMap<String, Vec<String>>,
    on_click: HashMap<String, VecDeque<(String, String)>>,
    bindings: HashSet<String>,
    actions: Vec<Action>,
}

pub(crate) struct FakeDriver {
    state: Mutex<FakeState>,
}

impl FakeDriver {
    pub(crate) fn new(url: &str) -> Self {
        Self {
            state: Mutex::new(FakeState {
                url: url.to_string(),
                ..Default::default()
            }),
        }
    }

    /// Add an element's outer HTML under `selector`.
    pub(crate) fn with_element(self, selector: &str, outer_html: &str) -> Self {
        self.state
            .lock()
            .elements
            .entry(selector.to_string())
            .or_default()
            .push(outer_html.to_string());
        self
    }

    /// Serve selectors without a keyed element from this document.
    pub(crate) fn with_document(self, html: &str) -> Self {
        self.state.lock().document = Some(html.to_string());
        self
    }

    /// The next click on `clicked` makes `outer_html` appear under `selector`.
    pub(crate) fn on_click(self, clicked: &str, selector: &str, outer_html: &str) -> Self {
        self.state
            .lock()
            .on_click
            .entry(clicked.to_string())
            .or_default()
            .push_back((selector.to_string(), outer_html.to_string()));
        self
    }

    pub(crate) fn actions(&self) -> Vec<Action> {
        self.state.lock().actions.clone()
    }

    pub(crate) fn clicks(&self) -> Vec<String> {
        self.actions()
            .into_iter()
            .filter_map(|a| match a {
                Action::Click(selector) => Some(selector),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn html(&self, selector: &str) -> Vec<String> {
        self.state
            .lock()
            .elements
            .get(selector)
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn count(&self, selector: &str) -> usize {
        self.html(selector).len()
    }
}

fn page_error(message: impl ToString) -> CdpError {
    CdpError::JavaScript(message.to_string())
}

fn parse_selector(selector: &str) -> Result<Selector, CdpError> {
    Selector::parse(selector).map_err(page_error)
}

/// Attributes of the element the markup starts with, as the page reports them.
fn attributes_of(outer_html: &str) -> Vec<(String, String)> {
    let doc = extract::parse_element(outer_html);
    extract::element_root(&doc, outer_html)
        .value()
        .attrs()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

fn document_matches(document: &str, selector: &str) -> Result<Vec<String>, CdpError> {
    let selector = parse_selector(selector)?;
    let doc = Html::parse_document(document);
    let matches = doc.select(&selector).map(|el| el.html()).collect();
    Ok(matches)
}

/// Outermost descendants of `element` matched by any of `ignore`.
fn ignored_subtrees<'a>(element: ElementRef<'a>, ignore: &[Selector], out: &mut Vec<ElementRef<'a>>) {
    for child in element.children().filter_map(ElementRef::wrap) {
        if ignore.iter().any(|s| s.matches(&child)) {
            out.push(child);
        } else {
            ignored_subtrees(child, ignore, out);
        }
    }
}

fn without_subtrees(root: ElementRef<'_>, ignore: &[Selector]) -> String {
    let mut ignored = Vec::new();
    ignored_subtrees(root, ignore, &mut ignored);
    ignored
        .iter()
        .fold(root.html(), |markup, el| markup.replacen(&el.html(), "", 1))
}

fn toggle_aria_checked(html: &str) -> String {
    if html.contains(r#"aria-checked="true""#) {
        html.replacen(r#"aria-checked="true""#, r#"aria-checked="false""#, 1)
    } else {
        html.replacen(r#"aria-checked="false""#, r#"aria-checked="true""#, 1)
    }
}

#[async_trait]
impl PageDriver for FakeDriver {
    async fn url(&self) -> Result<String, CdpError> {
        Ok(self.state.lock().url.clone())
    }

    async fn query_all(&self, selector: &str) -> Result<Vec<ElementHandle>, CdpError> {
        let keyed = self.html(selector);
        let document = self.state.lock().document.clone();
        let html = match document {
            Some(document) if keyed.is_empty() => document_matches(&document, selector)?,
            _ => keyed,
        };
        Ok(html
            .into_iter()
            .enumerate()
            .map(|(index, outer_html)| ElementHandle {
                selector: selector.to_string(),
                index,
                attributes: attributes_of(&outer_html),
                outer_html,
            })
            .collect())
    }

    async fn outer_html_without(
        &self,
        element: &ElementHandle,
        ignore: &[String],
    ) -> Result<String, CdpError> {
        let ignore = ignore
            .iter()
            .map(|s| parse_selector(s))
            .collect::<Result<Vec<_>, _>>()?;
        let keyed = self.count(&element.selector) > 0;
        let document = self.state.lock().document.clone();

        match document {
            Some(document) if !keyed => {
                let selector = parse_selector(&element.selector)?;
                let doc = Html::parse_document(&document);
                let root = doc
                    .select(&selector)
                    .nth(element.index)
                    .ok_or_else(|| CdpError::ElementNotFound(element.selector.clone()))?;
                Ok(without_subtrees(root, &ignore))
            }
            _ => {
                let doc = extract::parse_element(&element.outer_html);
                let root = extract::element_root(&doc, &element.outer_html);
                Ok(without_subtrees(root, &ignore))
            }
        }
    }

    async fn click(&self, element: &ElementHandle) -> Result<(), CdpError> {
        let mut state = self.state.lock();
        let html = state
            .elements
            .get_mut(&element.selector)
            .and_then(|els| els.get_mut(element.index))
            .ok_or_else(|| CdpError::ElementNotFound(element.selector.clone()))?;
        *html = toggle_aria_checked(html);

        let appear = state
            .on_click
            .get_mut(&element.selector)
            .and_then(|queue| queue.pop_front());
        if let Some((selector, outer_html)) = appear {
            state.elements.entry(selector).or_default().push(outer_html);
        }
        state.actions.push(Action::Click(element.selector.clone()));
        Ok(())
    }

    async fn set_value(&self, element: &ElementHandle, value: &str) -> Result<(), CdpError> {
        self.state
            .lock()
            .actions
            .push(Action::SetValue(element.selector.clone(), value.to_string()));
        Ok(())
    }

    async fn remove_all(&self, selector: &str) -> Result<usize, CdpError> {
        let mut state = self.state.lock();
        let removed = state.elements.remove(selector).map_or(0, |els| els.len());
        state.actions.push(Action::RemoveAll(selector.to_string()));
        Ok(removed)
    }

    async fn wait_for_selector(&self, selector: &str, _timeout: Duration) -> Result<(), CdpError> {
        if self.count(selector) > 0 {
            Ok(())
        } else {
            Err(CdpError::Timeout(format!(
                "Waiting for selector '{}' timed out",
                selector
            )))
        }
    }

    async fn navigate(&self, url: &str) -> Result<(), CdpError> {
        let mut state = self.state.lock();
        state.url = url.to_string();
        state.actions.push(Action::Navigate(url.to_string()));
        Ok(())
    }

    async fn reload(&self) -> Result<(), CdpError> {
        self.state.lock().actions.push(Action::Reload);
        Ok(())
    }

    fn has_binding(&self, name: &str) -> bool {
        self.state.lock().bindings.contains(name)
    }

    async fn add_binding(&self, name: &str, _callback: BindingCallback) -> Result<(), CdpError> {
        let mut state = self.state.lock();
        state.bindings.insert(name.to_string());
        state.actions.push(Action::AddBinding(name.to_string()));
        Ok(())
    }

    async fn close(&self) -> Result<(), CdpError> {
        self.state.lock().actions.push(Action::Close);
        Ok(())
    }
}
