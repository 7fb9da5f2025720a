//! Mock sleeper for testing.

use crate::application::ports::Sleeper;
use crate::infrastructure::mocks::MockClock;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Sleeper that records requested sleeps instead of waiting.
///
/// Optionally linked to a [`MockClock`], in which case every recorded sleep
/// also advances the clock by the requested duration — simulating elapsed
/// time the way a real wait would.
#[derive(Debug, Clone, Default)]
pub struct MockSleeper {
    sleeps: Arc<Mutex<Vec<Duration>>>,
    clock: Option<Arc<MockClock>>,
}

impl MockSleeper {
    /// Create a sleeper that only records.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sleeper that records and advances `clock` on each sleep.
    pub fn advancing(clock: Arc<MockClock>) -> Self {
        Self {
            sleeps: Arc::new(Mutex::new(Vec::new())),
            clock: Some(clock),
        }
    }

    /// All sleep durations requested so far, in order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps
            .lock()
            .expect("MockSleeper mutex poisoned - a test thread panicked while holding the lock")
            .clone()
    }

    /// Total time slept.
    pub fn total_slept(&self) -> Duration {
        self.sleeps().iter().sum()
    }
}

impl Sleeper for MockSleeper {
    fn sleep(&self, duration: Duration) {
        self.sleeps
            .lock()
            .expect("MockSleeper mutex poisoned - a test thread panicked while holding the lock")
            .push(duration);
        if let Some(clock) = &self.clock {
            clock.advance(duration);
        }
    }
}
