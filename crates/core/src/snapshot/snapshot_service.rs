//! Snapshot build service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, error};

use crate::errors::Result;
use crate::holdings::HoldingsRepositoryTrait;
use crate::snapshot::snapshot_calculator::{calculate_snapshot, to_holding_snapshots};
use crate::snapshot::snapshot_model::{PortfolioSnapshot, SnapshotBatchSummary};
use crate::snapshot::snapshot_traits::{SnapshotRepositoryTrait, SnapshotServiceTrait};

enum BuildOutcome {
    Created(PortfolioSnapshot),
    Skipped(PortfolioSnapshot),
    Empty,
}

pub struct SnapshotService {
    holdings_repository: Arc<dyn HoldingsRepositoryTrait>,
    snapshot_repository: Arc<dyn SnapshotRepositoryTrait>,
}

impl SnapshotService {
    pub fn new(
        holdings_repository: Arc<dyn HoldingsRepositoryTrait>,
        snapshot_repository: Arc<dyn SnapshotRepositoryTrait>,
    ) -> Self {
        Self {
            holdings_repository,
            snapshot_repository,
        }
    }

    async fn build_today(&self, fund_id: &str) -> Result<BuildOutcome> {
        let holdings = self.holdings_repository.get_holdings_by_fund(fund_id)?;
        if holdings.is_empty() {
            debug!("No current holdings for fund {}; skipping snapshot", fund_id);
            return Ok(BuildOutcome::Empty);
        }

        let now = Utc::now().naive_utc();
        let today = now.date();

        let snapshot = match calculate_snapshot(fund_id, today, now, &holdings) {
            Some(snapshot) => snapshot,
            None => return Ok(BuildOutcome::Empty),
        };

        let created = self.snapshot_repository.save_snapshot(snapshot.clone()).await?;

        // Holding rows are keyed independently, so backfill them even when
        // the portfolio row already existed.
        let holding_rows = to_holding_snapshots(fund_id, today, now, &holdings);
        self.snapshot_repository
            .save_holding_snapshots(holding_rows)
            .await?;

        if created {
            Ok(BuildOutcome::Created(snapshot))
        } else {
            debug!(
                "Snapshot {} already exists; keeping the stored row",
                snapshot.id
            );
            let stored = self
                .snapshot_repository
                .get_snapshot(fund_id, today)?
                .unwrap_or(snapshot);
            Ok(BuildOutcome::Skipped(stored))
        }
    }
}

#[async_trait]
impl SnapshotServiceTrait for SnapshotService {
    async fn build_snapshot(&self, fund_id: &str) -> Result<Option<PortfolioSnapshot>> {
        match self.build_today(fund_id).await? {
            BuildOutcome::Created(snapshot) | BuildOutcome::Skipped(snapshot) => {
                Ok(Some(snapshot))
            }
            BuildOutcome::Empty => Ok(None),
        }
    }

    async fn build_snapshots(&self, fund_ids: &[String]) -> Result<SnapshotBatchSummary> {
        let mut summary = SnapshotBatchSummary::default();
        for fund_id in fund_ids {
            match self.build_today(fund_id).await {
                Ok(BuildOutcome::Created(_)) => summary.created += 1,
                Ok(BuildOutcome::Skipped(_)) => summary.skipped += 1,
                Ok(BuildOutcome::Empty) => summary.empty += 1,
                Err(e) => {
                    error!("Snapshot build failed for fund {}: {}", fund_id, e);
                    summary.failed += 1;
                }
            }
        }
        debug!(
            "Snapshot batch: {} created, {} skipped, {} empty, {} failed",
            summary.created, summary.skipped, summary.empty, summary.failed
        );
        Ok(summary)
    }
}
