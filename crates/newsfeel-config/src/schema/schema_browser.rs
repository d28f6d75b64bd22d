//! Browser process and extension configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Chromium launch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Explicit Chromium executable. Auto-detected when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chrome_path: Option<PathBuf>,

    /// Remote debugging port the CDP client connects to.
    #[serde(default = "default_debug_port")]
    pub debug_port: u16,

    /// Chromium user-data directory.
    #[serde(default = "default_profile_dir")]
    pub profile_dir: PathBuf,

    /// Unpacked Adblock Plus build.
    #[serde(default = "default_extension_dir")]
    pub extension_dir: PathBuf,

    /// How long to wait for the debugging endpoint after spawning Chromium.
    #[serde(default = "default_launch_timeout_ms")]
    pub launch_timeout_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            chrome_path: None,
            debug_port: default_debug_port(),
            profile_dir: default_profile_dir(),
            extension_dir: default_extension_dir(),
            launch_timeout_ms: default_launch_timeout_ms(),
        }
    }
}

impl BrowserConfig {
    /// HTTP endpoint of the debugging server.
    pub fn endpoint(&self) -> String {
        format!("http://127.0.0.1:{}", self.debug_port)
    }

    pub fn launch_timeout(&self) -> Duration {
        Duration::from_millis(self.launch_timeout_ms)
    }
}

fn default_debug_port() -> u16 {
    9222
}

fn default_profile_dir() -> PathBuf {
    PathBuf::from("chrome-profile")
}

fn default_extension_dir() -> PathBuf {
    PathBuf::from("abp-3.12")
}

fn default_launch_timeout_ms() -> u64 {
    10_000
}

/// How the Adblock Plus extension is located once the browser is up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionConfig {
    /// Title of the extension's background page target.
    #[serde(default = "default_background_title")]
    pub background_title: String,

    /// Options page path under `chrome-extension://<id>/`.
    #[serde(default = "default_settings_path")]
    pub settings_path: String,

    /// Deadline for the background target to show up in the target list.
    #[serde(default = "default_discovery_timeout_ms")]
    pub discovery_timeout_ms: u64,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            background_title: default_background_title(),
            settings_path: default_settings_path(),
            discovery_timeout_ms: default_discovery_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl ExtensionConfig {
    pub fn discovery_timeout(&self) -> Duration {
        Duration::from_millis(self.discovery_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

fn default_background_title() -> String {
    "Adblock Plus - free ad blocker".to_string()
}

fn default_settings_path() -> String {
    "desktop-options.html".to_string()
}

fn default_discovery_timeout_ms() -> u64 {
    5_000
}

fn default_poll_interval_ms() -> u64 {
    250
}
