//! SQLite storage implementation for portfolio snapshots.

mod model;
mod repository;

pub use model::{HoldingSnapshotDB, PortfolioSnapshotDB};
pub use repository::SnapshotRepository;

// Re-export trait from core for convenience
pub use fundtrack_core::snapshot::SnapshotRepositoryTrait;
