//! Filter-list subscriptions.

use serde::{Deserialize, Serialize};

/// A filter list the extension should be subscribed to.
///
/// `selector` detects an existing subscription in the options page table,
/// `url` is what gets imported when it is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterListConfig {
    pub name: String,
    pub selector: String,
    pub url: String,
}

impl FilterListConfig {
    pub fn new(name: impl Into<String>, selector: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            selector: selector.into(),
            url: url.into(),
        }
    }
}

/// The catalog subscribed when the configuration does not name its own.
pub fn default_filter_lists() -> Vec<FilterListConfig> {
    vec![
        FilterListConfig::new(
            "Easylist",
            r#"li[aria-label="EasyList"]"#,
            "https://easylist-downloads.adblockplus.org/easylist.txt",
        ),
        FilterListConfig::new(
            "RoList",
            r#"li[aria-label="ROList+EasyList"]"#,
            "https://easylist-downloads.adblockplus.org/rolist+easylist.txt",
        ),
        FilterListConfig::new(
            "ABP-anti-CV",
            r#"li[aria-label="ABP filters"]"#,
            "https://easylist-downloads.adblockplus.org/abp-filters-anti-cv.txt",
        ),
    ]
}
