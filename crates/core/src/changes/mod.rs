//! Change-detection module - diffs between stored portfolio states.

mod changes_model;
mod changes_service;
mod changes_traits;
mod diff;

pub use changes_model::*;
pub use changes_service::*;
pub use changes_traits::*;
pub use diff::*;
