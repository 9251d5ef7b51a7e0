use crate::errors::Result;
use crate::snapshot::snapshot_model::{
    HoldingSnapshot, PortfolioSnapshot, SnapshotBatchSummary,
};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Trait for snapshot repository operations.
#[async_trait]
pub trait SnapshotRepositoryTrait: Send + Sync {
    /// Persists a portfolio snapshot. Returns `true` when the row was
    /// created, `false` when a snapshot for that fund and day already
    /// existed (the existing row is left untouched).
    async fn save_snapshot(&self, snapshot: PortfolioSnapshot) -> Result<bool>;

    /// Persists per-holding history rows, skipping rows whose
    /// (fund, symbol, day) already exist. Returns the number inserted.
    async fn save_holding_snapshots(&self, snapshots: Vec<HoldingSnapshot>) -> Result<usize>;

    /// Loads the snapshot of one fund at one exact day, if present.
    fn get_snapshot(&self, fund_id: &str, snapshot_date: NaiveDate)
        -> Result<Option<PortfolioSnapshot>>;

    /// Latest snapshot of a fund at or before the given day.
    fn get_latest_snapshot_on_or_before(
        &self,
        fund_id: &str,
        snapshot_date: NaiveDate,
    ) -> Result<Option<PortfolioSnapshot>>;

    /// Most recent snapshots of a fund, newest first.
    fn get_latest_snapshots(&self, fund_id: &str, limit: i64) -> Result<Vec<PortfolioSnapshot>>;

    /// Snapshots of a fund within an optional date range, newest first.
    fn get_snapshots_by_fund(
        &self,
        fund_id: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<PortfolioSnapshot>>;

    /// All per-holding rows of one fund at one day.
    fn get_holding_snapshots_for_date(
        &self,
        fund_id: &str,
        snapshot_date: NaiveDate,
    ) -> Result<Vec<HoldingSnapshot>>;

    /// Distinct days with per-holding rows for a fund, newest first.
    fn get_holding_snapshot_dates(&self, fund_id: &str, limit: i64) -> Result<Vec<NaiveDate>>;

    /// Latest day at or before the given day with per-holding rows.
    fn get_latest_holding_snapshot_date_on_or_before(
        &self,
        fund_id: &str,
        snapshot_date: NaiveDate,
    ) -> Result<Option<NaiveDate>>;
}

/// Trait for snapshot service operations.
#[async_trait]
pub trait SnapshotServiceTrait: Send + Sync {
    /// Builds and persists today's snapshot for one fund.
    ///
    /// Returns `Ok(None)` when the fund has no current holdings. When a
    /// snapshot for today already exists the stored row wins and is
    /// returned unchanged.
    async fn build_snapshot(&self, fund_id: &str) -> Result<Option<PortfolioSnapshot>>;

    /// Builds today's snapshot for every given fund, continuing past
    /// per-fund failures.
    async fn build_snapshots(&self, fund_ids: &[String]) -> Result<SnapshotBatchSummary>;
}
