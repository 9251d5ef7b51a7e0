use crate::changes::changes_model::PortfolioChange;
use crate::errors::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Trait for portfolio-change repository operations.
#[async_trait]
pub trait ChangeRepositoryTrait: Send + Sync {
    /// Persists detected changes, skipping rows whose
    /// (fund, day, symbol, kind) already exist. Returns the number inserted.
    async fn save_changes(&self, changes: Vec<PortfolioChange>) -> Result<usize>;

    /// Changes of one fund dated at or after `since`, newest first.
    fn get_changes_since(&self, fund_id: &str, since: NaiveDate) -> Result<Vec<PortfolioChange>>;

    /// MEDIUM and HIGH changes across all funds dated at or after `since`.
    fn get_significant_changes_since(&self, since: NaiveDate) -> Result<Vec<PortfolioChange>>;
}

/// Trait for change-detection service operations.
#[async_trait]
pub trait ChangeServiceTrait: Send + Sync {
    /// Diffs two stored states of one fund.
    ///
    /// Each bound resolves to the latest stored state at or before it; a
    /// missing `to` means today, a missing `from` means the latest state
    /// strictly before the resolved target day. Returns an empty list when
    /// either side cannot be resolved. Results are not persisted.
    fn compare_snapshots(
        &self,
        fund_id: &str,
        from_date: Option<NaiveDate>,
        to_date: Option<NaiveDate>,
    ) -> Result<Vec<PortfolioChange>>;

    /// Diffs today's state against the previous stored state and persists
    /// the detected changes. Re-runs on the same day insert nothing new.
    async fn detect_and_persist_changes(&self, fund_id: &str) -> Result<Vec<PortfolioChange>>;
}
