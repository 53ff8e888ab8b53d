//! Pause/cancel control flags shared between a UI thread and running jobs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// How often a paused loop re-checks its flags.
pub const PAUSE_POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Default)]
struct Inner {
    paused: AtomicBool,
    cancelled: AtomicBool,
}

/// Cloneable handle for pausing and cancelling conversion work.
///
/// All clones share the same underlying flags, so one handle can be kept by
/// the caller while another travels into the batch scheduler.
#[derive(Debug, Clone, Default)]
pub struct ControlFlags {
    inner: Arc<Inner>,
}

impl ControlFlags {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pause(&self) {
        self.inner.paused.store(true, Ordering::SeqCst);
    }

    pub fn resume(&self) {
        self.inner.paused.store(false, Ordering::SeqCst);
    }

    /// Flips the pause flag and returns the new state (true = now paused).
    pub fn toggle_pause(&self) -> bool {
        !self.inner.paused.fetch_xor(true, Ordering::SeqCst)
    }

    /// Requests cancellation. Also clears pause so waiting loops wake up.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
        self.inner.paused.store(false, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.inner.paused.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Blocks while paused, re-checking every [`PAUSE_POLL_INTERVAL`].
    /// Returns immediately once cancellation is requested.
    pub fn wait_while_paused(&self) {
        while self.is_paused() && !self.is_cancelled() {
            std::thread::sleep(PAUSE_POLL_INTERVAL);
        }
    }
}
