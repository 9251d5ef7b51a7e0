//! Snapshot module - immutable daily portfolio history.

mod snapshot_calculator;
mod snapshot_model;
mod snapshot_service;
mod snapshot_traits;

pub use snapshot_calculator::*;
pub use snapshot_model::*;
pub use snapshot_service::*;
pub use snapshot_traits::*;
