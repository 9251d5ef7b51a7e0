use crate::changes::PortfolioChange;
use crate::errors::Result;
use crate::snapshot::{HoldingSnapshot, PortfolioSnapshot};
use chrono::NaiveDate;

/// Trait for read-only history queries over stored snapshots and changes.
pub trait HistoryServiceTrait: Send + Sync {
    /// Changes of one fund over a trailing window of days, newest first.
    /// A non-positive window falls back to the default.
    fn change_history(&self, fund_id: &str, days: Option<i64>) -> Result<Vec<PortfolioChange>>;

    /// MEDIUM and HIGH changes across all funds over a trailing window of
    /// days, newest first.
    fn significant_changes(&self, days: Option<i64>) -> Result<Vec<PortfolioChange>>;

    /// Full per-holding portfolio of one fund as of a day, resolved to the
    /// latest stored day at or before it. Weight-descending.
    fn holdings_as_of(&self, fund_id: &str, date: NaiveDate) -> Result<Vec<HoldingSnapshot>>;

    /// Stored snapshots of one fund, optionally bounded, newest first.
    fn snapshot_history(
        &self,
        fund_id: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<PortfolioSnapshot>>;
}
