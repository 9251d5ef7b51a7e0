//! History query service.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};

use crate::changes::{ChangeRepositoryTrait, PortfolioChange};
use crate::constants::{DEFAULT_CHANGE_HISTORY_DAYS, DEFAULT_SIGNIFICANT_CHANGES_DAYS};
use crate::errors::Result;
use crate::history::history_traits::HistoryServiceTrait;
use crate::snapshot::{HoldingSnapshot, PortfolioSnapshot, SnapshotRepositoryTrait};

pub struct HistoryService {
    snapshot_repository: Arc<dyn SnapshotRepositoryTrait>,
    change_repository: Arc<dyn ChangeRepositoryTrait>,
}

impl HistoryService {
    pub fn new(
        snapshot_repository: Arc<dyn SnapshotRepositoryTrait>,
        change_repository: Arc<dyn ChangeRepositoryTrait>,
    ) -> Self {
        Self {
            snapshot_repository,
            change_repository,
        }
    }

    fn window_start(days: Option<i64>, default_days: i64) -> NaiveDate {
        let days = match days {
            Some(d) if d > 0 => d,
            _ => default_days,
        };
        Utc::now().date_naive() - Duration::days(days)
    }
}

impl HistoryServiceTrait for HistoryService {
    fn change_history(&self, fund_id: &str, days: Option<i64>) -> Result<Vec<PortfolioChange>> {
        let since = Self::window_start(days, DEFAULT_CHANGE_HISTORY_DAYS);
        self.change_repository.get_changes_since(fund_id, since)
    }

    fn significant_changes(&self, days: Option<i64>) -> Result<Vec<PortfolioChange>> {
        let since = Self::window_start(days, DEFAULT_SIGNIFICANT_CHANGES_DAYS);
        self.change_repository.get_significant_changes_since(since)
    }

    fn holdings_as_of(&self, fund_id: &str, date: NaiveDate) -> Result<Vec<HoldingSnapshot>> {
        let day = match self
            .snapshot_repository
            .get_latest_holding_snapshot_date_on_or_before(fund_id, date)?
        {
            Some(day) => day,
            None => return Ok(Vec::new()),
        };
        let mut rows = self
            .snapshot_repository
            .get_holding_snapshots_for_date(fund_id, day)?;
        rows.sort_by(|a, b| b.percentage.cmp(&a.percentage));
        Ok(rows)
    }

    fn snapshot_history(
        &self,
        fund_id: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<PortfolioSnapshot>> {
        self.snapshot_repository
            .get_snapshots_by_fund(fund_id, start_date, end_date)
    }
}
