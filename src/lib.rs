//! # outreach-pacer
//!
//! Rate-limited action scheduling with a persisted follow-protection ledger.
//!
//! This crate is the pacing core of a social outreach tool: it decides
//! *when* a follow or unfollow may happen and *which* identities are
//! eligible, while the platform-specific work (driving a browser or an API)
//! stays behind the [`ActionExecutor`] port. The scheduler enforces hourly
//! and daily action caps, a fixed delay between actions, and a protection
//! window during which freshly followed accounts are exempt from
//! unfollowing — with that protection state persisted across runs as a
//! small JSON ledger.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use outreach_pacer::{PacerConfig, Scheduler};
//! use outreach_pacer::infrastructure::store::JsonFileStore;
//! # use outreach_pacer::application::ports::{ActionExecutor, IdentitySource, SessionError};
//! # use outreach_pacer::Identity;
//! # use std::collections::BTreeSet;
//! # #[derive(Debug)] struct BrowserExecutor;
//! # impl ActionExecutor for BrowserExecutor {
//! #     fn open_session(&mut self) -> Result<(), SessionError> { Ok(()) }
//! #     fn attempt_follow(&mut self, _: &Identity) -> Result<bool, SessionError> { Ok(true) }
//! #     fn attempt_unfollow(&mut self, _: &Identity) -> Result<bool, SessionError> { Ok(true) }
//! # }
//! # #[derive(Debug)] struct ProfileSource;
//! # impl IdentitySource for ProfileSource {
//! #     fn following(&mut self) -> Result<BTreeSet<Identity>, SessionError> { Ok(BTreeSet::new()) }
//! #     fn followers(&mut self) -> Result<BTreeSet<Identity>, SessionError> { Ok(BTreeSet::new()) }
//! # }
//!
//! // Defaults: 20 actions/hour, 150/day, 5s between actions, 3-day protection.
//! let mut scheduler = Scheduler::builder(BrowserExecutor)
//!     .with_config(PacerConfig::default())
//!     .with_store(JsonFileStore::new("protection_ledger.json"))
//!     .build()
//!     .unwrap();
//!
//! let mut source = ProfileSource;
//! let report = scheduler.run_unfollow(&mut source).unwrap();
//! println!("completed {} of {} candidates", report.completed, report.candidates);
//! ```
//!
//! ## Pacing model
//!
//! Each action asks the limiter for permission:
//!
//! - **Proceed** — both windows have headroom; act now.
//! - **WaitThenProceed** — the hour cap is hit; sleep out the remainder of
//!   the hour window, restart it, and act.
//! - **Deny** — the day cap is hit; the run stops. The day counter never
//!   rolls over within a run.
//!
//! The hour window is rolled before any limit comparison, so a boundary
//! crossing always clears stale counts first.
//!
//! ## Follow protection
//!
//! Successful follows are recorded in the [`ProtectionLedger`] with the
//! time they happened. An unfollow pass prunes expired entries once, up
//! front, then excludes anything still inside the protection period from
//! its candidates. The ledger is saved on every exit path — normal, day
//! limited, or aborted — so protection survives crashes between runs.
//!
//! ## Determinism and testing
//!
//! Time and waiting are ports ([`Clock`], [`Sleeper`]): production uses the
//! system clock and real sleeps, tests inject `MockClock`/`MockSleeper`
//! (behind the `test-helpers` feature) and simulate hours in microseconds.
//! Candidate enumeration is ordered, so a dry run is reproducible.
//!
//! [`ActionExecutor`]: application::ports::ActionExecutor
//! [`Clock`]: application::ports::Clock
//! [`Sleeper`]: application::ports::Sleeper
//! [`ProtectionLedger`]: domain::ledger::ProtectionLedger

// Domain layer - pure business logic
pub mod domain;

// Application layer - orchestration
pub mod application;

// Infrastructure layer - external adapters
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::{
    identity::Identity,
    ledger::ProtectionLedger,
    limits::{ConfigError, PacerConfig},
    timestamp::Timestamp,
    window::{AcquireDecision, RateWindows},
};

pub use application::{
    collector::collect_identities,
    limiter::ActionLimiter,
    metrics::{Metrics, MetricsSnapshot},
    ports::{
        ActionExecutor, ActionKind, Clock, IdentityFeed, IdentitySource, LedgerStore,
        SessionError, Sleeper, StoreError,
    },
    scheduler::{PacerError, RunPhase, RunReport, Scheduler, SchedulerBuilder, StopReason},
};

pub use infrastructure::{clock::SystemClock, sleep::ThreadSleeper, store::JsonFileStore};
