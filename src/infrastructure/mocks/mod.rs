//! Mock implementations for testing.
//!
//! This module provides test doubles for the application ports, enabling
//! controlled testing of scheduling behavior without a real platform,
//! filesystem, or clock.

pub mod clock;
pub mod executor;
pub mod sleep;
pub mod source;
pub mod store;

pub use clock::MockClock;
pub use executor::ScriptedExecutor;
pub use sleep::MockSleeper;
pub use source::{PagedFeed, StaticSource};
pub use store::MemoryStore;
