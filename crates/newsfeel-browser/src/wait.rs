//! Polling with a deadline.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

/// Call `probe` every `interval` until it yields `Some` or `timeout` passes.
///
/// The probe always runs at least once, and once more at the deadline.
pub(crate) async fn poll_until<T, F, Fut>(timeout: Duration, interval: Duration, mut probe: F) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<T>>,
{
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(value) = probe().await {
            return Some(value);
        }
        let now = Instant::now();
        if now >= deadline {
            return None;
        }
        tokio::time::sleep(interval.min(deadline - now)).await;
    }
}
