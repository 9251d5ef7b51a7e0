//! SQLite storage implementation for detected portfolio changes.

mod model;
mod repository;

pub use model::PortfolioChangeDB;
pub use repository::ChangeRepository;

// Re-export trait from core for convenience
pub use fundtrack_core::changes::ChangeRepositoryTrait;
