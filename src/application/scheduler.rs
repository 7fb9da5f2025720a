//! The action scheduler.
//!
//! Sequences candidate identities through the rate limiter and the
//! protection ledger, invoking the external executor for each approved
//! action. One parameterized scheduler covers both follow and unfollow
//! passes; the two differ only in how candidates are computed and whether
//! successes are recorded in the ledger.
//!
//! A pass moves through `Idle -> CollectingCandidates -> Acting -> Draining
//! -> Done`, with an early `Acting -> Done` exit when the day limit is
//! exhausted. Every exit path — drained, day-limited, or session failure —
//! persists the ledger exactly once.

use crate::application::collector::collect_identities;
use crate::application::limiter::ActionLimiter;
use crate::application::metrics::Metrics;
use crate::application::ports::{
    ActionExecutor, ActionKind, Clock, IdentityFeed, IdentitySource, LedgerStore, SessionError,
    Sleeper,
};
use crate::domain::identity::Identity;
use crate::domain::ledger::ProtectionLedger;
use crate::domain::limits::{ConfigError, PacerConfig};
use crate::domain::window::AcquireDecision;
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::sleep::ThreadSleeper;
use crate::infrastructure::store::JsonFileStore;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Phase of a scheduling pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// No pass in progress.
    Idle,
    /// Gathering and filtering candidate identities.
    CollectingCandidates,
    /// Applying actions to candidates in order.
    Acting,
    /// Candidates exhausted; finishing up.
    Draining,
    /// Pass complete.
    Done,
}

/// Why a pass stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every candidate was attempted.
    Drained,
    /// The day limit was reached; remaining candidates were not attempted.
    DayLimitReached,
}

/// Summary of a completed scheduling pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// The action this pass applied.
    pub kind: ActionKind,
    /// Candidates eligible after exclusion filtering.
    pub candidates: usize,
    /// Actions completed by the executor.
    pub completed: u32,
    /// Expected per-candidate failures (logged and skipped).
    pub failed: u32,
    /// Why the pass stopped.
    pub stop_reason: StopReason,
}

/// Error that aborts a scheduling pass.
#[derive(Debug, Error)]
pub enum PacerError {
    /// Session could not be established or was lost mid-run.
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Builder for a [`Scheduler`].
pub struct SchedulerBuilder<E> {
    executor: E,
    config: PacerConfig,
    store: Option<Box<dyn LedgerStore>>,
    clock: Option<Arc<dyn Clock>>,
    sleeper: Option<Arc<dyn Sleeper>>,
}

impl<E: ActionExecutor> SchedulerBuilder<E> {
    /// Set the pacing configuration.
    pub fn with_config(mut self, config: PacerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the ledger store. Defaults to `protection_ledger.json` in the
    /// working directory.
    pub fn with_store(mut self, store: impl LedgerStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Set the clock. Defaults to the system clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set the sleeper. Defaults to blocking thread sleeps.
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = Some(sleeper);
        self
    }

    /// Validate the configuration and build the scheduler.
    pub fn build(self) -> Result<Scheduler<E>, ConfigError> {
        self.config.validate()?;

        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(SystemClock::new()) as Arc<dyn Clock>);
        let sleeper = self
            .sleeper
            .unwrap_or_else(|| Arc::new(ThreadSleeper::new()) as Arc<dyn Sleeper>);
        let store = self
            .store
            .unwrap_or_else(|| Box::new(JsonFileStore::new("protection_ledger.json")));
        let limiter = ActionLimiter::new(self.config.clone(), clock.clone());

        Ok(Scheduler {
            executor: self.executor,
            config: self.config,
            store,
            clock,
            sleeper,
            limiter,
            metrics: Metrics::new(),
            ledger: ProtectionLedger::new(),
            phase: RunPhase::Idle,
        })
    }
}

/// Sequences candidates through the limiter, the ledger, and the executor.
///
/// The scheduler exclusively owns the rate-window counters; the ledger is
/// owned here too, with its serialized form shared with the store at load
/// and save points. Counters survive across passes within a process, so a
/// follow pass and an unfollow pass in the same run share the day budget.
pub struct Scheduler<E: ActionExecutor> {
    executor: E,
    config: PacerConfig,
    store: Box<dyn LedgerStore>,
    clock: Arc<dyn Clock>,
    sleeper: Arc<dyn Sleeper>,
    limiter: ActionLimiter,
    metrics: Metrics,
    ledger: ProtectionLedger,
    phase: RunPhase,
}

impl<E: ActionExecutor> Scheduler<E> {
    /// Start building a scheduler around an executor.
    pub fn builder(executor: E) -> SchedulerBuilder<E> {
        SchedulerBuilder {
            executor,
            config: PacerConfig::default(),
            store: None,
            clock: None,
            sleeper: None,
        }
    }

    /// Run an unfollow pass.
    ///
    /// Candidates are identities the account follows that do not follow
    /// back, minus anything still under follow protection.
    pub fn run_unfollow<S>(&mut self, source: &mut S) -> Result<RunReport, PacerError>
    where
        S: IdentitySource + ?Sized,
    {
        self.phase = RunPhase::Idle;
        self.ledger = self.load_ledger();

        let outcome = self.unfollow_pass(source);
        self.persist_ledger();
        self.enter(RunPhase::Done);

        Ok(outcome?)
    }

    /// Run a follow pass over a paginated candidate feed.
    ///
    /// Candidates are the collected feed minus identities already under
    /// follow protection (a recently followed handle is not re-attempted).
    /// Successful follows are recorded in the ledger so a later unfollow
    /// pass leaves them alone.
    pub fn run_follow<F>(&mut self, feed: &mut F) -> Result<RunReport, PacerError>
    where
        F: IdentityFeed + ?Sized,
    {
        self.phase = RunPhase::Idle;
        self.ledger = self.load_ledger();

        let outcome = self.follow_pass(feed);
        self.persist_ledger();
        self.enter(RunPhase::Done);

        Ok(outcome?)
    }

    /// Current phase of the scheduler.
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Metrics handle for this scheduler.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// The in-memory ledger as of the last pass.
    pub fn ledger(&self) -> &ProtectionLedger {
        &self.ledger
    }

    fn unfollow_pass<S>(&mut self, source: &mut S) -> Result<RunReport, SessionError>
    where
        S: IdentitySource + ?Sized,
    {
        self.executor.open_session()?;
        self.enter(RunPhase::CollectingCandidates);

        let following = source.following()?;
        let followers = source.followers()?;
        let candidates = self.filter_candidates(
            following
                .iter()
                .filter(|id| !followers.contains(*id))
                .cloned(),
        );

        info!(
            following = following.len(),
            followers = followers.len(),
            candidates = candidates.len(),
            "computed unfollow candidates"
        );

        self.act(ActionKind::Unfollow, &candidates)
    }

    fn follow_pass<F>(&mut self, feed: &mut F) -> Result<RunReport, SessionError>
    where
        F: IdentityFeed + ?Sized,
    {
        self.executor.open_session()?;
        self.enter(RunPhase::CollectingCandidates);

        let collected = collect_identities(
            feed,
            self.sleeper.as_ref(),
            self.config.collect_settle(),
            self.config.stall_threshold,
        )?;
        let candidates = self.filter_candidates(collected.into_iter());

        info!(candidates = candidates.len(), "computed follow candidates");

        self.act(ActionKind::Follow, &candidates)
    }

    /// Prune the ledger once for this pass, then drop protected identities
    /// from the candidate stream, preserving the stream's order.
    fn filter_candidates(
        &mut self,
        eligible: impl Iterator<Item = Identity>,
    ) -> Vec<Identity> {
        let now = self.clock.now();
        let period = self.config.protection_period();

        let pruned = self.ledger.prune_expired(now, period);
        if pruned > 0 {
            info!(pruned, "expired protection entries removed");
            self.metrics.record_pruned(pruned as u64);
        }

        let mut excluded = 0u64;
        let candidates: Vec<Identity> = eligible
            .filter(|id| {
                if self.ledger.is_protected(id, now, period) {
                    debug!(identity = %id, "candidate still protected, excluded");
                    excluded += 1;
                    false
                } else {
                    true
                }
            })
            .collect();

        if excluded > 0 {
            self.metrics.record_protected_exclusions(excluded);
        }
        candidates
    }

    fn act(
        &mut self,
        kind: ActionKind,
        candidates: &[Identity],
    ) -> Result<RunReport, SessionError> {
        self.enter(RunPhase::Acting);

        let mut completed = 0u32;
        let mut failed = 0u32;
        let mut first_action = true;

        for identity in candidates {
            match self.limiter.try_acquire() {
                AcquireDecision::Deny => {
                    info!(
                        day_count = self.limiter.day_count(),
                        "day limit reached, stopping run"
                    );
                    return Ok(RunReport {
                        kind,
                        candidates: candidates.len(),
                        completed,
                        failed,
                        stop_reason: StopReason::DayLimitReached,
                    });
                }
                AcquireDecision::WaitThenProceed(wait) => {
                    info!(wait_secs = wait.as_secs(), "hour limit reached, waiting");
                    self.sleeper.sleep(wait);
                    self.limiter.restart_hour();
                }
                AcquireDecision::Proceed => {}
            }

            // The very first action of a run skips the inter-action delay.
            if !first_action {
                self.sleeper.sleep(self.config.action_delay());
            }
            first_action = false;

            let succeeded = match kind {
                ActionKind::Follow => self.executor.attempt_follow(identity)?,
                ActionKind::Unfollow => self.executor.attempt_unfollow(identity)?,
            };

            if succeeded {
                self.limiter.record_action();
                self.metrics.record_completed();
                completed += 1;
                if kind == ActionKind::Follow {
                    self.ledger.record_protected(identity.clone(), self.clock.now());
                }
                info!(
                    identity = %identity,
                    action = %kind,
                    hour_count = self.limiter.hour_count(),
                    day_count = self.limiter.day_count(),
                    "action completed"
                );
            } else {
                // Failure is local: it does not count against the limits.
                self.metrics.record_failed();
                failed += 1;
                warn!(identity = %identity, action = %kind, "action failed, skipping");
            }
        }

        self.enter(RunPhase::Draining);
        Ok(RunReport {
            kind,
            candidates: candidates.len(),
            completed,
            failed,
            stop_reason: StopReason::Drained,
        })
    }

    fn load_ledger(&self) -> ProtectionLedger {
        match self.store.load() {
            Ok(ledger) => {
                info!(entries = ledger.len(), "loaded protection ledger");
                ledger
            }
            Err(error) => {
                warn!(%error, "could not load protection ledger, starting empty");
                ProtectionLedger::new()
            }
        }
    }

    fn persist_ledger(&self) {
        if let Err(error) = self.store.save(&self.ledger) {
            // Losing protection state is an accepted, logged degradation.
            warn!(%error, "failed to persist protection ledger");
        }
    }

    fn enter(&mut self, phase: RunPhase) {
        debug!(from = ?self.phase, to = ?phase, "phase transition");
        self.phase = phase;
    }
}
