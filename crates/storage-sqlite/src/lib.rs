//! SQLite storage implementation for Fundtrack.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `fundtrack-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for holdings, snapshots and changes
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies
//! exist. `fundtrack-core` is database-agnostic and works with traits.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod changes;
pub mod holdings;
pub mod snapshot;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from fundtrack-core for convenience
pub use fundtrack_core::errors::{DatabaseError, Error, Result};
