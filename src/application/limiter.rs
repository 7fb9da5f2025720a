//! Rate limiter coordination logic.
//!
//! Wraps the pure window accounting with a clock so callers just ask
//! "may I act now?" and record completed actions.

use crate::application::ports::Clock;
use crate::domain::limits::PacerConfig;
use crate::domain::window::{AcquireDecision, RateWindows};
use std::sync::Arc;
use tracing::debug;

/// Decides whether an action may proceed under the hour/day limits.
#[derive(Debug)]
pub struct ActionLimiter {
    windows: RateWindows,
    config: PacerConfig,
    clock: Arc<dyn Clock>,
}

impl ActionLimiter {
    /// Create a limiter with fresh windows anchored at the current time.
    pub fn new(config: PacerConfig, clock: Arc<dyn Clock>) -> Self {
        let windows = RateWindows::new(clock.now());
        Self {
            windows,
            config,
            clock,
        }
    }

    /// Ask whether an action may proceed now.
    ///
    /// On `WaitThenProceed`, the caller must sleep the signaled duration,
    /// call [`restart_hour`](Self::restart_hour), and then proceed — a single
    /// retry, never recursive.
    pub fn try_acquire(&mut self) -> AcquireDecision {
        let now = self.clock.now();
        let decision = self.windows.check(now, &self.config);

        match decision {
            AcquireDecision::WaitThenProceed(wait) => {
                debug!(
                    wait_secs = wait.as_secs(),
                    hour_count = self.windows.hour_count(),
                    "hour limit reached"
                );
            }
            AcquireDecision::Deny => {
                debug!(day_count = self.windows.day_count(), "day limit reached");
            }
            AcquireDecision::Proceed => {}
        }

        decision
    }

    /// Restart the hour window after the signaled wait has elapsed.
    pub fn restart_hour(&mut self) {
        self.windows.restart_hour(self.clock.now());
    }

    /// Record one completed action.
    ///
    /// Must only be called after `try_acquire` resolved to an allowed
    /// outcome.
    pub fn record_action(&mut self) {
        self.windows.record();
    }

    /// Actions recorded in the current hour window.
    pub fn hour_count(&self) -> u32 {
        self.windows.hour_count()
    }

    /// Actions recorded today.
    pub fn day_count(&self) -> u32 {
        self.windows.day_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::timestamp::Timestamp;
    use crate::infrastructure::mocks::MockClock;
    use std::time::Duration;

    fn limiter(hour_limit: u32, day_limit: u32, clock: &Arc<MockClock>) -> ActionLimiter {
        let config = PacerConfig {
            hour_limit,
            day_limit,
            ..Default::default()
        };
        ActionLimiter::new(config, clock.clone())
    }

    #[test]
    fn test_proceed_then_wait_then_deny() {
        let clock = Arc::new(MockClock::new(Timestamp::from_millis(0)));
        let mut limiter = limiter(1, 2, &clock);

        assert_eq!(limiter.try_acquire(), AcquireDecision::Proceed);
        limiter.record_action();

        // Hour exhausted, day still has headroom.
        assert!(matches!(
            limiter.try_acquire(),
            AcquireDecision::WaitThenProceed(_)
        ));
        limiter.restart_hour();
        assert_eq!(limiter.try_acquire(), AcquireDecision::Proceed);
        limiter.record_action();

        // Day exhausted.
        assert_eq!(limiter.try_acquire(), AcquireDecision::Deny);
    }

    #[test]
    fn test_third_acquire_waits_then_succeeds() {
        let clock = Arc::new(MockClock::new(Timestamp::from_millis(0)));
        let mut limiter = limiter(2, 10, &clock);

        assert_eq!(limiter.try_acquire(), AcquireDecision::Proceed);
        limiter.record_action();
        assert_eq!(limiter.try_acquire(), AcquireDecision::Proceed);
        limiter.record_action();

        let wait = match limiter.try_acquire() {
            AcquireDecision::WaitThenProceed(wait) => wait,
            other => panic!("expected WaitThenProceed, got {other:?}"),
        };
        assert!(wait <= Duration::from_secs(3600));

        // Simulate the wait, restart the window, and the acquisition
        // succeeds with a zeroed hour count.
        clock.advance(wait);
        limiter.restart_hour();
        assert_eq!(limiter.hour_count(), 0);
        assert_eq!(limiter.try_acquire(), AcquireDecision::Proceed);
        limiter.record_action();
        assert_eq!(limiter.day_count(), 3);
    }

    #[test]
    fn test_hour_window_rolls_with_clock_advance() {
        let clock = Arc::new(MockClock::new(Timestamp::from_millis(0)));
        let mut limiter = limiter(1, 10, &clock);

        assert_eq!(limiter.try_acquire(), AcquireDecision::Proceed);
        limiter.record_action();

        // Crossing the hour boundary clears the count without an explicit
        // restart.
        clock.advance(Duration::from_secs(3600));
        assert_eq!(limiter.try_acquire(), AcquireDecision::Proceed);
        assert_eq!(limiter.hour_count(), 0);
    }
}
