//! Wait and delay configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Deadlines for the waits the automation performs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    #[serde(default = "default_navigation_timeout_ms")]
    pub navigation_timeout_ms: u64,

    #[serde(default = "default_selector_timeout_ms")]
    pub selector_timeout_ms: u64,

    /// Quiet window the network must hold before a navigation counts as done.
    #[serde(default = "default_network_idle_ms")]
    pub network_idle_ms: u64,

    /// In-flight requests still tolerated during the quiet window.
    #[serde(default = "default_network_idle_max_inflight")]
    pub network_idle_max_inflight: usize,

    /// Settling time after triggering a filter-list update.
    #[serde(default = "default_update_settle_ms")]
    pub update_settle_ms: u64,

    /// Deadline for a fresh profile directory to appear on disk.
    #[serde(default = "default_profile_wait_ms")]
    pub profile_wait_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            navigation_timeout_ms: default_navigation_timeout_ms(),
            selector_timeout_ms: default_selector_timeout_ms(),
            network_idle_ms: default_network_idle_ms(),
            network_idle_max_inflight: default_network_idle_max_inflight(),
            update_settle_ms: default_update_settle_ms(),
            profile_wait_ms: default_profile_wait_ms(),
        }
    }
}

impl TimingConfig {
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    pub fn selector_timeout(&self) -> Duration {
        Duration::from_millis(self.selector_timeout_ms)
    }

    pub fn network_idle(&self) -> Duration {
        Duration::from_millis(self.network_idle_ms)
    }

    pub fn update_settle(&self) -> Duration {
        Duration::from_millis(self.update_settle_ms)
    }

    pub fn profile_wait(&self) -> Duration {
        Duration::from_millis(self.profile_wait_ms)
    }
}

fn default_navigation_timeout_ms() -> u64 {
    30_000
}

fn default_selector_timeout_ms() -> u64 {
    30_000
}

fn default_network_idle_ms() -> u64 {
    500
}

fn default_network_idle_max_inflight() -> usize {
    2
}

fn default_update_settle_ms() -> u64 {
    5_000
}

fn default_profile_wait_ms() -> u64 {
    2_000
}
