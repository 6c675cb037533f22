//! Cooperative shutdown token for the polling loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Granularity at which [`Shutdown::sleep`] checks for a shutdown request.
const SLEEP_SLICE: Duration = Duration::from_millis(100);

/// Shared flag that asks the monitor loop to stop.
///
/// Clones observe the same flag, so one clone can be moved into a signal
/// handler while the loop keeps another. Collectors never consult it.
#[derive(Debug, Clone, Default)]
pub struct Shutdown {
    requested: Arc<AtomicBool>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests shutdown. The loop exits after its current iteration.
    pub fn request(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    /// Sleeps for `duration`, waking early if shutdown is requested.
    ///
    /// Returns `true` if the full duration elapsed without a request.
    pub fn sleep(&self, duration: Duration) -> bool {
        let mut remaining = duration;
        while remaining > Duration::ZERO && !self.is_requested() {
            let sleep_time = remaining.min(SLEEP_SLICE);
            std::thread::sleep(sleep_time);
            remaining = remaining.saturating_sub(sleep_time);
        }
        !self.is_requested()
    }
}
