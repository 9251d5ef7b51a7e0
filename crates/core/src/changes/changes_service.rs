//! Change-detection service.
//!
//! Resolves stored portfolio states for requested days and diffs them.
//! Per-holding history rows are the preferred source for a state; the
//! snapshot's truncated top list is only used for days that predate
//! per-holding history.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use log::debug;

use crate::changes::changes_model::{PortfolioChange, PortfolioState};
use crate::changes::changes_traits::{ChangeRepositoryTrait, ChangeServiceTrait};
use crate::changes::diff::diff_states;
use crate::errors::Result;
use crate::snapshot::SnapshotRepositoryTrait;

pub struct ChangeService {
    snapshot_repository: Arc<dyn SnapshotRepositoryTrait>,
    change_repository: Arc<dyn ChangeRepositoryTrait>,
}

impl ChangeService {
    pub fn new(
        snapshot_repository: Arc<dyn SnapshotRepositoryTrait>,
        change_repository: Arc<dyn ChangeRepositoryTrait>,
    ) -> Self {
        Self {
            snapshot_repository,
            change_repository,
        }
    }

    /// Latest stored state of a fund at or before the given day.
    ///
    /// The day itself is the newer of the latest per-holding day and the
    /// latest snapshot day within the bound, so a portfolio snapshot saved
    /// without per-holding rows is still reachable.
    fn resolve_state(
        &self,
        fund_id: &str,
        on_or_before: NaiveDate,
    ) -> Result<Option<PortfolioState>> {
        let holding_day = self
            .snapshot_repository
            .get_latest_holding_snapshot_date_on_or_before(fund_id, on_or_before)?;
        let snapshot_day = self
            .snapshot_repository
            .get_latest_snapshot_on_or_before(fund_id, on_or_before)?
            .map(|s| s.snapshot_date);

        let day = match (holding_day, snapshot_day) {
            (Some(h), Some(s)) => h.max(s),
            (Some(h), None) => h,
            (None, Some(s)) => s,
            (None, None) => return Ok(None),
        };

        let rows = self
            .snapshot_repository
            .get_holding_snapshots_for_date(fund_id, day)?;
        if !rows.is_empty() {
            return Ok(Some(PortfolioState::from_holding_snapshots(day, &rows)));
        }

        match self.snapshot_repository.get_snapshot(fund_id, day)? {
            Some(snapshot) => Ok(Some(PortfolioState::from_snapshot(&snapshot))),
            None => Ok(None),
        }
    }

    /// The two most recent stored days of a fund, older first.
    fn latest_two_days(&self, fund_id: &str) -> Result<Option<(NaiveDate, NaiveDate)>> {
        let snapshots = self.snapshot_repository.get_latest_snapshots(fund_id, 2)?;
        if snapshots.len() >= 2 {
            return Ok(Some((snapshots[1].snapshot_date, snapshots[0].snapshot_date)));
        }
        let dates = self.snapshot_repository.get_holding_snapshot_dates(fund_id, 2)?;
        if dates.len() >= 2 {
            return Ok(Some((dates[1], dates[0])));
        }
        Ok(None)
    }
}

#[async_trait]
impl ChangeServiceTrait for ChangeService {
    fn compare_snapshots(
        &self,
        fund_id: &str,
        from_date: Option<NaiveDate>,
        to_date: Option<NaiveDate>,
    ) -> Result<Vec<PortfolioChange>> {
        let (base, target) = match (from_date, to_date) {
            (None, None) => match self.latest_two_days(fund_id)? {
                Some((base_day, target_day)) => (
                    self.resolve_state(fund_id, base_day)?,
                    self.resolve_state(fund_id, target_day)?,
                ),
                None => return Ok(Vec::new()),
            },
            _ => {
                let target_day = to_date.unwrap_or_else(|| Utc::now().date_naive());
                let target = self.resolve_state(fund_id, target_day)?;
                let base = match from_date {
                    Some(day) => self.resolve_state(fund_id, day)?,
                    None => match target.as_ref().and_then(|t| t.snapshot_date.pred_opt()) {
                        Some(before_target) => self.resolve_state(fund_id, before_target)?,
                        None => None,
                    },
                };
                (base, target)
            }
        };

        match (base, target) {
            (Some(base), Some(target)) => {
                if base.snapshot_date == target.snapshot_date {
                    debug!(
                        "Both bounds resolve to {} for fund {}; nothing to diff",
                        base.snapshot_date, fund_id
                    );
                    return Ok(Vec::new());
                }
                Ok(diff_states(fund_id, &base, &target, Utc::now().naive_utc()))
            }
            _ => Ok(Vec::new()),
        }
    }

    async fn detect_and_persist_changes(&self, fund_id: &str) -> Result<Vec<PortfolioChange>> {
        let today = Utc::now().date_naive();
        let target = match self.resolve_state(fund_id, today)? {
            Some(target) => target,
            None => return Ok(Vec::new()),
        };
        let base_bound = match target.snapshot_date.pred_opt() {
            Some(day) => day,
            None => return Ok(Vec::new()),
        };
        let base = match self.resolve_state(fund_id, base_bound)? {
            Some(base) => base,
            None => {
                debug!(
                    "No prior state before {} for fund {}; nothing to detect",
                    target.snapshot_date, fund_id
                );
                return Ok(Vec::new());
            }
        };

        let changes = diff_states(fund_id, &base, &target, Utc::now().naive_utc());
        if !changes.is_empty() {
            let inserted = self.change_repository.save_changes(changes.clone()).await?;
            debug!(
                "Persisted {} of {} detected changes for fund {}",
                inserted,
                changes.len(),
                fund_id
            );
        }
        Ok(changes)
    }
}
