//! Application layer - orchestration of domain logic.
//!
//! This layer coordinates the domain logic and manages the runtime behavior:
//! - The action limiter (rate decisions over the clock port)
//! - The bounded identity collector
//! - The scheduler (candidate filtering, acting loop, ledger persistence)
//! - Run metrics
//!
//! ## Ports
//!
//! The application layer defines ports (traits) that infrastructure
//! adapters and external collaborators must implement. This keeps the
//! scheduling logic independent from any browser, API, or filesystem
//! detail.

pub mod collector;
pub mod limiter;
pub mod metrics;
pub mod ports;
pub mod scheduler;
