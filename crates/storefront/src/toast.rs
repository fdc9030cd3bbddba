//! "Added to Bag" toast.
//!
//! A one-shot timed flag: [`Toast::show`] makes it visible and schedules a
//! dismissal on the tokio runtime. Showing again while a dismissal is pending
//! aborts that task and starts a fresh one, so the toast stays up for a full
//! duration after the most recent show.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

/// Default time the toast stays visible.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(2000);

/// Sentinel for "hidden" in [`Toast::shown`].
const HIDDEN: u64 = 0;

#[derive(Debug)]
pub struct Toast {
    duration: Duration,
    /// Generation that made the toast visible, or `HIDDEN`.
    shown: Arc<AtomicU64>,
    next_generation: u64,
    pending: Option<JoinHandle<()>>,
}

impl Toast {
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            shown: Arc::new(AtomicU64::new(HIDDEN)),
            next_generation: HIDDEN,
            pending: None,
        }
    }

    /// How long the toast stays up after a show.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.shown.load(Ordering::Acquire) != HIDDEN
    }

    /// Show the toast and (re)start the dismissal timer.
    ///
    /// Outside a tokio runtime the toast is shown without a timer and stays
    /// up until [`Toast::dismiss`].
    pub fn show(&mut self) {
        self.cancel_pending();

        self.next_generation = self.next_generation.wrapping_add(1).max(1);
        let generation = self.next_generation;
        self.shown.store(generation, Ordering::Release);

        let Ok(runtime) = Handle::try_current() else {
            debug!("No async runtime, toast stays until dismissed");
            return;
        };

        let shown = Arc::clone(&self.shown);
        let duration = self.duration;
        self.pending = Some(runtime.spawn(async move {
            tokio::time::sleep(duration).await;
            // Only hide the toast this task was scheduled for.
            let _ = shown.compare_exchange(generation, HIDDEN, Ordering::AcqRel, Ordering::Acquire);
        }));
    }

    /// Hide the toast now and drop any pending dismissal.
    pub fn dismiss(&mut self) {
        self.cancel_pending();
        self.shown.store(HIDDEN, Ordering::Release);
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

impl Default for Toast {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

impl Drop for Toast {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
