//! Text, attribute and link extraction over serialized element markup.
//!
//! The page hands over an element's outer HTML (already stripped of ignored
//! subtrees) and its attributes; everything here is pure and runs on the host
//! with `scraper`.

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use url::Url;

use crate::error::PageError;

/// Elements whose text never renders.
const INVISIBLE_TAGS: &[&str] = &["script", "style", "noscript", "template", "head", "title"];

/// Elements that start a new line of text.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr",
    "li", "main", "nav", "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

/// Requested attribute values of one element.
///
/// Exactly one present attribute yields `Single`; zero or several yield
/// `Many` in request order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttributeValues {
    Single(String),
    Many(Vec<String>),
}

impl AttributeValues {
    fn from_values(mut values: Vec<String>) -> Self {
        if values.len() == 1 {
            AttributeValues::Single(values.remove(0))
        } else {
            AttributeValues::Many(values)
        }
    }

    pub fn as_single(&self) -> Option<&str> {
        match self {
            AttributeValues::Single(value) => Some(value),
            AttributeValues::Many(_) => None,
        }
    }

    pub fn into_vec(self) -> Vec<String> {
        match self {
            AttributeValues::Single(value) => vec![value],
            AttributeValues::Many(values) => values,
        }
    }
}

/// Collapse every whitespace run to a single space and trim both ends.
pub fn collapse_separators(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Compile CSS selectors.
pub fn parse_selectors(selectors: &[&str]) -> Result<Vec<Selector>, PageError> {
    selectors
        .iter()
        .map(|s| {
            Selector::parse(s).map_err(|e| PageError::InvalidSelector {
                selector: s.to_string(),
                message: e.to_string(),
            })
        })
        .collect()
}

/// Rendered text of an element.
pub fn visible_text(outer_html: &str) -> String {
    let doc = parse_element(outer_html);
    let root = element_root(&doc, outer_html);
    let mut out = String::new();
    collect_text(root, &mut out);
    collapse_separators(&out)
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    let block = BLOCK_TAGS.contains(&element.value().name());
    if block {
        out.push(' ');
    }

    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            if !is_invisible(&child_element) {
                collect_text(child_element, out);
            }
        }
    }

    if block {
        out.push(' ');
    }
}

fn is_invisible(element: &ElementRef<'_>) -> bool {
    INVISIBLE_TAGS.contains(&element.value().name()) || element.value().attr("hidden").is_some()
}

/// Values of the requested attributes that are present on the element.
///
/// `attributes` are the element's own name/value pairs as read in the page.
pub fn attribute_values(attributes: &[(String, String)], names: &[&str]) -> AttributeValues {
    let values = names
        .iter()
        .filter_map(|name| attributes.iter().find(|(n, _)| n == name))
        .map(|(_, value)| value.clone())
        .collect();
    AttributeValues::from_values(values)
}

/// Raw `href` of every anchor below the element, in document order. The
/// element itself is not included.
pub fn anchor_hrefs(outer_html: &str) -> Vec<String> {
    let doc = parse_element(outer_html);
    let root = element_root(&doc, outer_html);
    root.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "a")
        .filter_map(|el| el.value().attr("href"))
        .map(str::to_string)
        .collect()
}

/// Drop ignored hrefs, then make root-relative and fragment links absolute.
///
/// Root-relative links are only resolved when the page has a tuple origin;
/// under opaque origins (`file://`, `about:blank`) they are kept as-is.
/// Fragment links are appended to `page_url` verbatim.
pub fn normalize_links(hrefs: Vec<String>, ignore_list: &[&str], page_url: &str) -> Vec<String> {
    let origin = origin_of(page_url);

    hrefs
        .into_iter()
        .filter(|href| !ignore_list.contains(&href.as_str()))
        .map(|href| {
            if href.starts_with("//") {
                Url::parse(page_url)
                    .and_then(|base| base.join(&href))
                    .map(String::from)
                    .unwrap_or(href)
            } else if href.starts_with('/') {
                match &origin {
                    Some(origin) => format!("{}{}", origin, href),
                    None => href,
                }
            } else if href.starts_with('#') {
                format!("{}{}", page_url, href)
            } else {
                href
            }
        })
        .collect()
}

/// `scheme://host[:port]` of a URL, `None` for opaque origins.
pub fn origin_of(url: &str) -> Option<String> {
    let origin = Url::parse(url).ok()?.origin();
    origin.is_tuple().then(|| origin.ascii_serialization())
}

/// Parse one element's markup in a context that keeps its own tag.
pub(crate) fn parse_element(outer_html: &str) -> Html {
    let tag = leading_tag(outer_html);
    match tag.as_deref() {
        Some("html" | "body" | "head") => Html::parse_document(outer_html),
        Some(tag) => match table_context(tag) {
            Some((open, close)) => Html::parse_fragment(&format!("{}{}{}", open, outer_html, close)),
            None => Html::parse_fragment(outer_html),
        },
        None => Html::parse_fragment(outer_html),
    }
}

/// Wrapping markup table parts need; a body-context parse drops them.
fn table_context(tag: &str) -> Option<(&'static str, &'static str)> {
    match tag {
        "td" | "th" => Some(("<table><tbody><tr>", "</tr></tbody></table>")),
        "tr" => Some(("<table><tbody>", "</tbody></table>")),
        "tbody" | "thead" | "tfoot" | "caption" | "colgroup" => Some(("<table>", "</table>")),
        "col" => Some(("<table><colgroup>", "</colgroup></table>")),
        _ => None,
    }
}

/// The parsed counterpart of the markup's first tag, falling back to the
/// document root when there is none.
pub(crate) fn element_root<'a>(doc: &'a Html, outer_html: &str) -> ElementRef<'a> {
    let root = doc.root_element();
    let Some(tag) = leading_tag(outer_html) else {
        return root;
    };
    root.descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == tag)
        .unwrap_or(root)
}

fn leading_tag(outer_html: &str) -> Option<String> {
    let rest = outer_html.trim_start().strip_prefix('<')?;
    let tag: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();
    (!tag.is_empty()).then(|| tag.to_ascii_lowercase())
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;
