//! Observability counters for scheduling runs.
//!
//! All metrics use atomic operations; cloned handles share the same
//! underlying counts.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metrics tracking scheduler behavior.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

#[derive(Debug, Default)]
struct MetricsInner {
    /// Actions the executor completed successfully
    actions_completed: AtomicU64,
    /// Actions the executor reported as expected failures
    actions_failed: AtomicU64,
    /// Candidates excluded because they were protected
    protected_exclusions: AtomicU64,
    /// Ledger entries removed by pruning
    entries_pruned: AtomicU64,
}

impl Metrics {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_completed(&self) {
        self.inner.actions_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failed(&self) {
        self.inner.actions_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_protected_exclusions(&self, count: u64) {
        self.inner
            .protected_exclusions
            .fetch_add(count, Ordering::Relaxed);
    }

    pub(crate) fn record_pruned(&self, count: u64) {
        self.inner.entries_pruned.fetch_add(count, Ordering::Relaxed);
    }

    /// Total actions completed.
    pub fn actions_completed(&self) -> u64 {
        self.inner.actions_completed.load(Ordering::Relaxed)
    }

    /// Total expected action failures.
    pub fn actions_failed(&self) -> u64 {
        self.inner.actions_failed.load(Ordering::Relaxed)
    }

    /// Total candidates excluded by protection.
    pub fn protected_exclusions(&self) -> u64 {
        self.inner.protected_exclusions.load(Ordering::Relaxed)
    }

    /// Total ledger entries pruned.
    pub fn entries_pruned(&self) -> u64 {
        self.inner.entries_pruned.load(Ordering::Relaxed)
    }

    /// Get a point-in-time snapshot of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            actions_completed: self.actions_completed(),
            actions_failed: self.actions_failed(),
            protected_exclusions: self.protected_exclusions(),
            entries_pruned: self.entries_pruned(),
        }
    }
}

/// A point-in-time snapshot of scheduler metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Actions the executor completed successfully
    pub actions_completed: u64,
    /// Actions the executor reported as expected failures
    pub actions_failed: u64,
    /// Candidates excluded because they were protected
    pub protected_exclusions: u64,
    /// Ledger entries removed by pruning
    pub entries_pruned: u64,
}

impl MetricsSnapshot {
    /// Total action attempts (completed + failed).
    pub fn total_attempts(&self) -> u64 {
        self.actions_completed.saturating_add(self.actions_failed)
    }
}
