/*!
 * Best-effort scrolling to an in-page anchor.
 *
 * After navigating to a service page for a child search result, the child's
 * anchor may not be mounted yet. The scheduler tries a fixed number of times
 * at increasing offsets from the navigation, whatever each attempt reports.
 */

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use parking_lot::Mutex;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;

/// Offsets from navigation at which scrolling is attempted
pub const SCROLL_RETRY_OFFSETS: [Duration; 3] = [
    Duration::from_millis(100),
    Duration::from_millis(300),
    Duration::from_millis(700),
];

/// Page surface able to bring an anchor into view
pub trait ScrollHost: Send + Sync {
    /// Scroll to the element with this anchor id; false when it is not mounted
    fn scroll_to_anchor(&self, anchor: &str) -> bool;
}

/// Runs anchor-scroll attempts, one schedule at a time
pub struct ScrollScheduler {
    host: Arc<dyn ScrollHost>,
    parent: CancellationToken,
    pending: Mutex<Option<CancellationToken>>,
}

impl ScrollScheduler {
    /// Create a scheduler whose tasks stop when `parent` is cancelled
    pub fn new(host: Arc<dyn ScrollHost>, parent: CancellationToken) -> Self {
        Self {
            host,
            parent,
            pending: Mutex::new(None),
        }
    }

    /// Start a new attempt schedule, cancelling the previous one
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule(&self, anchor: &str) {
        let token = self.parent.child_token();
        if let Some(previous) = self.pending.lock().replace(token.clone()) {
            previous.cancel();
        }

        let host = Arc::clone(&self.host);
        let anchor = anchor.to_string();
        let started = Instant::now();

        tokio::spawn(async move {
            for (attempt, offset) in SCROLL_RETRY_OFFSETS.iter().enumerate() {
                tokio::select! {
                    _ = token.cancelled() => {
                        debug!("Scroll to '{}' cancelled before attempt {}", anchor, attempt + 1);
                        return;
                    }
                    _ = sleep_until(started + *offset) => {}
                }

                let found = host.scroll_to_anchor(&anchor);
                debug!("Scroll attempt {} to '{}': {}", attempt + 1, anchor, if found { "found" } else { "not mounted" });
            }
        });
    }

    /// Stop any schedule still running
    pub fn cancel(&self) {
        if let Some(pending) = self.pending.lock().take() {
            pending.cancel();
        }
    }
}
