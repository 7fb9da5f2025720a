//! Ports (interfaces) for the application layer.
//!
//! In hexagonal architecture, ports define the interfaces that the
//! application layer needs. Infrastructure adapters implement these ports;
//! the browser/API collaborators that actually touch the platform live
//! entirely behind `ActionExecutor` and the identity sources.

use crate::domain::identity::Identity;
use crate::domain::ledger::ProtectionLedger;
use crate::domain::timestamp::Timestamp;
use std::collections::BTreeSet;
use std::fmt::{self, Debug};
use std::time::Duration;
use thiserror::Error;

/// The kind of action a scheduling pass applies to its candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Follow the candidate.
    Follow,
    /// Unfollow the candidate.
    Unfollow,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Follow => f.write_str("follow"),
            ActionKind::Unfollow => f.write_str("unfollow"),
        }
    }
}

/// Fatal infrastructure failure from an executor or identity source.
///
/// Expected per-action failures are `Ok(false)` from the executor, never an
/// error; a `SessionError` means the session itself is unusable and the run
/// must abort.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The session could not be established at all (e.g. login rejected).
    #[error("could not establish a session: {0}")]
    LoginFailed(String),
    /// An established session stopped working mid-run.
    #[error("session lost: {0}")]
    SessionLost(String),
}

/// Port for obtaining current wall-clock time.
///
/// The ledger is durable across runs, so time is epoch-based rather than
/// `Instant`. Infrastructure provides `SystemClock` for production and
/// `MockClock` for tests.
pub trait Clock: Send + Sync + Debug {
    /// Get the current timestamp.
    fn now(&self) -> Timestamp;
}

/// Port for suspending the current logical task.
///
/// Every wait the scheduler performs (inter-action delay, hour-window wait,
/// collector settle) goes through this port, so tests can observe requested
/// sleeps and simulate elapsed time without real waiting.
pub trait Sleeper: Send + Sync + Debug {
    /// Pause for `duration`.
    fn sleep(&self, duration: Duration);
}

/// Port for the external collaborator that performs actions on the platform.
///
/// Both attempts return `Ok(false)` for expected failure (control not found,
/// transient UI change) — logged and skipped, never fatal. Session-level
/// failures propagate as `SessionError` and abort the run.
pub trait ActionExecutor: Debug {
    /// Establish a usable session. Called once, before any action.
    fn open_session(&mut self) -> Result<(), SessionError>;

    /// Attempt to follow `identity`.
    fn attempt_follow(&mut self, identity: &Identity) -> Result<bool, SessionError>;

    /// Attempt to unfollow `identity`.
    fn attempt_unfollow(&mut self, identity: &Identity) -> Result<bool, SessionError>;
}

/// Port supplying the materialized relationship sets for an unfollow pass.
pub trait IdentitySource: Debug {
    /// Identities the account currently follows.
    fn following(&mut self) -> Result<BTreeSet<Identity>, SessionError>;

    /// Identities currently following the account.
    fn followers(&mut self) -> Result<BTreeSet<Identity>, SessionError>;
}

/// Port supplying candidate identities one page at a time.
///
/// The collector drains pages until growth stalls; an empty or repeated page
/// counts toward the stall threshold. There is no end-of-stream signal —
/// exhaustion is inferred from no-growth, matching how a scrolled list
/// behaves.
pub trait IdentityFeed: Debug {
    /// Fetch the next page of identities.
    fn next_page(&mut self) -> Result<Vec<Identity>, SessionError>;
}

/// Error from the ledger store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying I/O failed.
    #[error("ledger I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// The stored ledger could not be (de)serialized.
    #[error("ledger serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Port for durable ledger persistence.
///
/// The ledger is loaded in full at run start and overwritten in full on
/// save; there is no append or merge format.
pub trait LedgerStore: Debug {
    /// Load the persisted ledger.
    ///
    /// A missing store yields an empty ledger; corrupt data is an error the
    /// scheduler degrades from (warn, start empty).
    fn load(&self) -> Result<ProtectionLedger, StoreError>;

    /// Persist the ledger, replacing any previous contents. Idempotent.
    fn save(&self, ledger: &ProtectionLedger) -> Result<(), StoreError>;
}
