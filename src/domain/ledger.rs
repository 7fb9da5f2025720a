//! The follow-protection ledger.
//!
//! Maps acted-upon identities to the time the action was taken. An identity
//! recorded within the protection period must never be selected for the
//! opposing action. Entries are pruned lazily, once per scheduling pass,
//! before candidates are computed.
//!
//! The serialized form is a flat JSON object of handle to epoch-ms integer,
//! overwritten in full on every save.

use crate::domain::identity::Identity;
use crate::domain::timestamp::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Durable mapping of protected identities to when they were recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProtectionLedger {
    entries: BTreeMap<Identity, Timestamp>,
}

impl ProtectionLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `identity` as protected from `now`, replacing any prior entry.
    pub fn record_protected(&mut self, identity: Identity, now: Timestamp) {
        self.entries.insert(identity, now);
    }

    /// Whether `identity` is protected at `now` under the given period.
    ///
    /// True iff the identity is present and `now - recorded_at <= period`.
    pub fn is_protected(&self, identity: &Identity, now: Timestamp, period: Duration) -> bool {
        match self.entries.get(identity) {
            Some(&recorded_at) => now.saturating_since(recorded_at) <= period,
            None => false,
        }
    }

    /// Remove every entry strictly past its protection period.
    ///
    /// Returns the number of entries removed. Idempotent: a second call at
    /// the same `now` removes nothing.
    pub fn prune_expired(&mut self, now: Timestamp, period: Duration) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, &mut recorded_at| now.saturating_since(recorded_at) <= period);
        before - self.entries.len()
    }

    /// Whether the ledger holds an entry for `identity`, expired or not.
    pub fn contains(&self, identity: &Identity) -> bool {
        self.entries.contains_key(identity)
    }

    /// When `identity` was recorded, if present.
    pub fn recorded_at(&self, identity: &Identity) -> Option<Timestamp> {
        self.entries.get(identity).copied()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the ledger is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in handle order.
    pub fn iter(&self) -> impl Iterator<Item = (&Identity, &Timestamp)> {
        self.entries.iter()
    }
}
