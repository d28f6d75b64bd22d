//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::loader::ConfigLoader;

mod schema_browser;
mod schema_filters;
mod schema_timing;

pub use schema_browser::*;
pub use schema_filters::*;
pub use schema_timing::*;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub extension: ExtensionConfig,

    #[serde(default)]
    pub timing: TimingConfig,

    /// Filter lists subscribed during setup. Replaces the default catalog
    /// entirely when present in the file.
    #[serde(default = "default_filter_lists")]
    pub filter_lists: Vec<FilterListConfig>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser: BrowserConfig::default(),
            extension: ExtensionConfig::default(),
            timing: TimingConfig::default(),
            filter_lists: default_filter_lists(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Expand `~` in every path-valued field.
    pub fn with_expanded_paths(mut self) -> Self {
        self.browser.profile_dir = ConfigLoader::expand_path_buf(&self.browser.profile_dir);
        self.browser.extension_dir = ConfigLoader::expand_path_buf(&self.browser.extension_dir);
        self.browser.chrome_path = self
            .browser
            .chrome_path
            .map(|p| ConfigLoader::expand_path_buf(&p));
        self.logging.dir = self.logging.dir.map(|p| ConfigLoader::expand_path_buf(&p));
        self
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for daily-rolling log files. Console only when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
