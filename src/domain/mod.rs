//! Domain layer - pure business logic with no external dependencies.
//!
//! This layer contains the core concepts and invariants of the pacing system:
//! - Identities and wall-clock timestamps
//! - Hour/day rate-window accounting
//! - The follow-protection ledger
//! - Pacing configuration and validation
//!
//! All types in this layer are pure and easily testable; the caller supplies
//! the current time.

pub mod identity;
pub mod ledger;
pub mod limits;
pub mod timestamp;
pub mod window;
