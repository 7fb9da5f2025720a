//! Rate-window accounting.
//!
//! Pure state: the caller supplies the current time, which keeps the
//! hour/day bookkeeping deterministic under test. The hour window rolls
//! before any limit comparison so a window-boundary crossing always clears
//! stale counts first; the day counter is monotonic for the run and never
//! auto-resets (the daily limit stops the run rather than rolling over).

use crate::domain::limits::{PacerConfig, HOUR_WINDOW};
use crate::domain::timestamp::Timestamp;
use std::time::Duration;

/// Outcome of asking the windows whether an action may proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireDecision {
    /// The action may proceed now.
    Proceed,
    /// The hour limit is exhausted; sleep exactly this long, restart the hour
    /// window, and proceed.
    WaitThenProceed(Duration),
    /// The day limit is exhausted; scheduling for today must stop.
    Deny,
}

impl AcquireDecision {
    /// Check if this decision is `Proceed`.
    pub fn is_proceed(&self) -> bool {
        matches!(self, AcquireDecision::Proceed)
    }

    /// Check if this decision is `Deny`.
    pub fn is_deny(&self) -> bool {
        matches!(self, AcquireDecision::Deny)
    }
}

/// Hour and day action counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateWindows {
    hour_start: Timestamp,
    hour_count: u32,
    day_count: u32,
}

impl RateWindows {
    /// Create fresh windows anchored at `now`.
    pub fn new(now: Timestamp) -> Self {
        Self {
            hour_start: now,
            hour_count: 0,
            day_count: 0,
        }
    }

    /// Decide whether an action may proceed at `now`.
    ///
    /// Rolls the hour window first, then checks the day limit, then the hour
    /// limit. `WaitThenProceed` carries the time remaining in the current
    /// hour window.
    pub fn check(&mut self, now: Timestamp, config: &PacerConfig) -> AcquireDecision {
        self.roll_hour(now);

        if self.day_count >= config.day_limit {
            return AcquireDecision::Deny;
        }

        if self.hour_count >= config.hour_limit {
            let elapsed = now.saturating_since(self.hour_start);
            let remaining = HOUR_WINDOW.saturating_sub(elapsed);
            return AcquireDecision::WaitThenProceed(remaining);
        }

        AcquireDecision::Proceed
    }

    /// Restart the hour window at `now` with a zero count.
    ///
    /// Called after the wait signaled by `WaitThenProceed` has elapsed.
    pub fn restart_hour(&mut self, now: Timestamp) {
        self.hour_start = now;
        self.hour_count = 0;
    }

    /// Record one completed action against both windows.
    pub fn record(&mut self) {
        self.hour_count += 1;
        self.day_count += 1;
    }

    /// Actions recorded in the current hour window.
    pub fn hour_count(&self) -> u32 {
        self.hour_count
    }

    /// Actions recorded today.
    pub fn day_count(&self) -> u32 {
        self.day_count
    }

    fn roll_hour(&mut self, now: Timestamp) {
        if now.saturating_since(self.hour_start) >= HOUR_WINDOW {
            self.hour_start = now;
            self.hour_count = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(hour_limit: u32, day_limit: u32) -> PacerConfig {
        PacerConfig {
            hour_limit,
            day_limit,
            ..Default::default()
        }
    }

    #[test]
    fn test_proceed_under_limits() {
        let now = Timestamp::from_millis(0);
        let mut windows = RateWindows::new(now);
        let config = config(2, 10);

        assert_eq!(windows.check(now, &config), AcquireDecision::Proceed);
        windows.record();
        assert_eq!(windows.check(now, &config), AcquireDecision::Proceed);
        windows.record();

        assert_eq!(windows.hour_count(), 2);
        assert_eq!(windows.day_count(), 2);
    }

    #[test]
    fn test_wait_when_hour_limit_reached() {
        let start = Timestamp::from_millis(0);
        let mut windows = RateWindows::new(start);
        let config = config(2, 10);

        windows.record();
        windows.record();

        // 10 minutes into the window: 50 minutes remain.
        let now = start + Duration::from_secs(600);
        match windows.check(now, &config) {
            AcquireDecision::WaitThenProceed(wait) => {
                assert_eq!(wait, Duration::from_secs(3000));
                assert!(wait <= HOUR_WINDOW);
            }
            other => panic!("expected WaitThenProceed, got {other:?}"),
        }
    }

    #[test]
    fn test_hour_window_rolls_before_limit_check() {
        let start = Timestamp::from_millis(0);
        let mut windows = RateWindows::new(start);
        let config = config(2, 10);

        windows.record();
        windows.record();

        // Crossing the hour boundary clears the stale count first, so the
        // check proceeds instead of signaling a wait.
        let later = start + HOUR_WINDOW;
        assert_eq!(windows.check(later, &config), AcquireDecision::Proceed);
        assert_eq!(windows.hour_count(), 0);
    }

    #[test]
    fn test_restart_hour_resets_count() {
        let start = Timestamp::from_millis(0);
        let mut windows = RateWindows::new(start);
        let config = config(1, 10);

        windows.record();
        assert!(matches!(
            windows.check(start, &config),
            AcquireDecision::WaitThenProceed(_)
        ));

        windows.restart_hour(start + Duration::from_secs(1800));
        assert_eq!(windows.hour_count(), 0);
        assert_eq!(
            windows.check(start + Duration::from_secs(1800), &config),
            AcquireDecision::Proceed
        );
    }

    #[test]
    fn test_deny_when_day_limit_reached() {
        let now = Timestamp::from_millis(0);
        let mut windows = RateWindows::new(now);
        let config = config(10, 2);

        windows.record();
        windows.record();

        assert_eq!(windows.check(now, &config), AcquireDecision::Deny);

        // The day counter never rolls, even across an hour boundary.
        let much_later = now + HOUR_WINDOW + HOUR_WINDOW;
        assert_eq!(windows.check(much_later, &config), AcquireDecision::Deny);
    }

    #[test]
    fn test_day_limit_takes_precedence_over_hour_wait() {
        let now = Timestamp::from_millis(0);
        let mut windows = RateWindows::new(now);
        let config = config(1, 1);

        windows.record();

        // Both limits exhausted: Deny, not WaitThenProceed.
        assert_eq!(windows.check(now, &config), AcquireDecision::Deny);
    }

    #[test]
    fn test_counts_never_exceed_limits_after_proceed() {
        let start = Timestamp::from_millis(0);
        let mut windows = RateWindows::new(start);
        let config = config(3, 7);
        let mut now = start;

        for _ in 0..50 {
            match windows.check(now, &config) {
                AcquireDecision::Proceed => {
                    windows.record();
                    assert!(windows.hour_count() <= config.hour_limit);
                    assert!(windows.day_count() <= config.day_limit);
                }
                AcquireDecision::WaitThenProceed(wait) => {
                    now = now + wait;
                    windows.restart_hour(now);
                }
                AcquireDecision::Deny => break,
            }
        }

        assert_eq!(windows.day_count(), config.day_limit);
    }
}
