//! SQLite storage implementation for current holdings.

mod model;
mod repository;

pub use model::HoldingDB;
pub use repository::HoldingsRepository;

// Re-export trait from core for convenience
pub use fundtrack_core::holdings::HoldingsRepositoryTrait;
