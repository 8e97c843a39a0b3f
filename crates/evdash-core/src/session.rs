//! Request-identity tracking for overlapping insight requests
//!
//! The proxy performs no hard cancellation: an in-flight network call runs
//! to completion. Instead, each issued request gets a monotonically
//! increasing token, and only the completion matching the latest issued
//! token may update visible state. A completion for a superseded token is
//! discarded on arrival.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Identity of one issued insight request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Tracks the latest issued request and its visible result
#[derive(Debug, Default)]
pub struct InsightTracker {
    issued: AtomicU64,
    latest: Mutex<Option<(u64, String)>>,
}

impl InsightTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new request token, superseding all earlier ones
    pub fn begin(&self) -> RequestToken {
        RequestToken(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether a token is still the latest issued
    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.issued.load(Ordering::SeqCst)
    }

    /// Record a completed result
    ///
    /// Returns true when the result became the visible state; false when the
    /// token was superseded and the result was discarded.
    pub fn complete(&self, token: RequestToken, text: impl Into<String>) -> bool {
        if !self.is_current(token) {
            return false;
        }
        let mut latest = self.latest.lock().expect("insight tracker lock poisoned");
        // A newer completion may have landed between the check and the lock
        if latest.as_ref().is_some_and(|(seq, _)| *seq > token.0) {
            return false;
        }
        *latest = Some((token.0, text.into()));
        true
    }

    /// Current visible insight text, if any accepted completion exists
    pub fn latest(&self) -> Option<String> {
        self.latest
            .lock()
            .expect("insight tracker lock poisoned")
            .as_ref()
            .map(|(_, text)| text.clone())
    }
}
