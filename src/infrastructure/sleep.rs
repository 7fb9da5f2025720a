//! Sleeper adapter for real waits.

use crate::application::ports::Sleeper;
use std::time::Duration;
use tracing::debug;

/// Sleeper that blocks the current thread.
///
/// The scheduler is single-threaded by design, so a blocking sleep is the
/// whole suspension story in production. Tests use `MockSleeper` instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl ThreadSleeper {
    /// Create a new thread sleeper.
    pub fn new() -> Self {
        Self
    }
}

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        debug!(secs = duration.as_secs_f64(), "sleeping");
        std::thread::sleep(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_sleeps_for_requested_duration() {
        let sleeper = ThreadSleeper::new();
        let start = Instant::now();
        sleeper.sleep(Duration::from_millis(20));
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_zero_sleep_returns_immediately() {
        ThreadSleeper::new().sleep(Duration::ZERO);
    }
}
