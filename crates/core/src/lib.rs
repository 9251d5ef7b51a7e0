//! Fundtrack Core - Domain entities, services, and traits.
//!
//! This crate contains the snapshot and change-detection engine for fund
//! portfolios. It is database-agnostic and defines traits that are
//! implemented by the `storage-sqlite` crate.

pub mod changes;
pub mod constants;
pub mod errors;
pub mod history;
pub mod holdings;
pub mod snapshot;

// Re-export common types from the snapshot and changes modules
pub use changes::*;
pub use snapshot::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
