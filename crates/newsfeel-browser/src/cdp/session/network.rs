//! In-flight request tracking for network-quiescence waits.

use std::collections::HashSet;
use std::time::Duration;

use tokio::time::Instant;

/// Counts in-flight requests and remembers since when the count has stayed
/// at or below the idle threshold.
#[derive(Debug)]
pub struct NetworkTracker {
    inflight: HashSet<String>,
    max_inflight: usize,
    quiet_since: Option<Instant>,
}

impl NetworkTracker {
    pub fn new(max_inflight: usize, now: Instant) -> Self {
        Self {
            inflight: HashSet::new(),
            max_inflight,
            quiet_since: Some(now),
        }
    }

    /// Record a request. Redirects reuse the request id and count once.
    pub fn request_started(&mut self, request_id: String, now: Instant) {
        self.inflight.insert(request_id);
        self.refresh(now);
    }

    pub fn request_finished(&mut self, request_id: &str, now: Instant) {
        self.inflight.remove(request_id);
        self.refresh(now);
    }

    pub fn set_max_inflight(&mut self, max_inflight: usize, now: Instant) {
        self.max_inflight = max_inflight;
        self.refresh(now);
    }

    /// Start a fresh quiet window, e.g. when a navigation begins.
    pub fn restart_window(&mut self, now: Instant) {
        self.quiet_since = None;
        self.refresh(now);
    }

    pub fn inflight(&self) -> usize {
        self.inflight.len()
    }

    /// How long the network has been quiet, `None` while it is busy.
    pub fn quiet_for(&self, now: Instant) -> Option<Duration> {
        self.quiet_since.map(|since| now.saturating_duration_since(since))
    }

    fn refresh(&mut self, now: Instant) {
        if self.inflight.len() > self.max_inflight {
            self.quiet_since = None;
        } else if self.quiet_since.is_none() {
            self.quiet_since = Some(now);
        }
    }
}
