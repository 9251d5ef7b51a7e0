//! Current-holdings module - the mutable per-fund position list.

mod holdings_model;
mod holdings_traits;

pub use holdings_model::*;
pub use holdings_traits::*;
