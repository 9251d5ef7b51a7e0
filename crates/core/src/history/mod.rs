//! History module - read-only queries over stored snapshots and changes.

mod history_service;
mod history_traits;

pub use history_service::*;
pub use history_traits::*;
