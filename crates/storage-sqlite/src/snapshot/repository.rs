use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::SqliteConnection;

use fundtrack_core::snapshot::{
    HoldingSnapshot, PortfolioSnapshot, SnapshotRepositoryTrait,
};
use fundtrack_core::Result;

use super::model::{HoldingSnapshotDB, PortfolioSnapshotDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::{holding_snapshots, portfolio_snapshots};

fn fmt_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub struct SnapshotRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl SnapshotRepository {
    pub fn new(
        pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        SnapshotRepository { pool, writer }
    }
}

#[async_trait]
impl SnapshotRepositoryTrait for SnapshotRepository {
    async fn save_snapshot(&self, snapshot: PortfolioSnapshot) -> Result<bool> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<bool> {
                let db: PortfolioSnapshotDB = snapshot.into();
                // The unique (fund_id, snapshot_date) index makes re-runs
                // no-ops; zero rows means the day was already snapshotted.
                let inserted = diesel::insert_into(portfolio_snapshots::table)
                    .values(&db)
                    .on_conflict_do_nothing()
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(inserted == 1)
            })
            .await
    }

    async fn save_holding_snapshots(&self, snapshots: Vec<HoldingSnapshot>) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let mut inserted = 0;
                for snapshot in snapshots {
                    let db: HoldingSnapshotDB = snapshot.into();
                    inserted += diesel::insert_into(holding_snapshots::table)
                        .values(&db)
                        .on_conflict_do_nothing()
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(inserted)
            })
            .await
    }

    fn get_snapshot(
        &self,
        fund_id: &str,
        snapshot_date: NaiveDate,
    ) -> Result<Option<PortfolioSnapshot>> {
        let mut conn = get_connection(&self.pool)?;
        let row = portfolio_snapshots::table
            .filter(portfolio_snapshots::fund_id.eq(fund_id))
            .filter(portfolio_snapshots::snapshot_date.eq(fmt_date(snapshot_date)))
            .first::<PortfolioSnapshotDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(PortfolioSnapshot::from))
    }

    fn get_latest_snapshot_on_or_before(
        &self,
        fund_id: &str,
        snapshot_date: NaiveDate,
    ) -> Result<Option<PortfolioSnapshot>> {
        let mut conn = get_connection(&self.pool)?;
        // ISO-8601 text dates compare lexicographically in date order.
        let row = portfolio_snapshots::table
            .filter(portfolio_snapshots::fund_id.eq(fund_id))
            .filter(portfolio_snapshots::snapshot_date.le(fmt_date(snapshot_date)))
            .order(portfolio_snapshots::snapshot_date.desc())
            .first::<PortfolioSnapshotDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(PortfolioSnapshot::from))
    }

    fn get_latest_snapshots(&self, fund_id: &str, limit: i64) -> Result<Vec<PortfolioSnapshot>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = portfolio_snapshots::table
            .filter(portfolio_snapshots::fund_id.eq(fund_id))
            .order(portfolio_snapshots::snapshot_date.desc())
            .limit(limit)
            .load::<PortfolioSnapshotDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(PortfolioSnapshot::from).collect())
    }

    fn get_snapshots_by_fund(
        &self,
        fund_id: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<PortfolioSnapshot>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = portfolio_snapshots::table
            .filter(portfolio_snapshots::fund_id.eq(fund_id))
            .into_boxed();
        if let Some(start) = start_date {
            query = query.filter(portfolio_snapshots::snapshot_date.ge(fmt_date(start)));
        }
        if let Some(end) = end_date {
            query = query.filter(portfolio_snapshots::snapshot_date.le(fmt_date(end)));
        }
        let rows = query
            .order(portfolio_snapshots::snapshot_date.desc())
            .load::<PortfolioSnapshotDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(PortfolioSnapshot::from).collect())
    }

    fn get_holding_snapshots_for_date(
        &self,
        fund_id: &str,
        snapshot_date: NaiveDate,
    ) -> Result<Vec<HoldingSnapshot>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = holding_snapshots::table
            .filter(holding_snapshots::fund_id.eq(fund_id))
            .filter(holding_snapshots::snapshot_date.eq(fmt_date(snapshot_date)))
            .load::<HoldingSnapshotDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(HoldingSnapshot::from).collect())
    }

    fn get_holding_snapshot_dates(&self, fund_id: &str, limit: i64) -> Result<Vec<NaiveDate>> {
        let mut conn = get_connection(&self.pool)?;
        let dates = holding_snapshots::table
            .filter(holding_snapshots::fund_id.eq(fund_id))
            .select(holding_snapshots::snapshot_date)
            .distinct()
            .order(holding_snapshots::snapshot_date.desc())
            .limit(limit)
            .load::<String>(&mut conn)
            .into_core()?;
        Ok(dates
            .iter()
            .filter_map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .collect())
    }

    fn get_latest_holding_snapshot_date_on_or_before(
        &self,
        fund_id: &str,
        snapshot_date: NaiveDate,
    ) -> Result<Option<NaiveDate>> {
        let mut conn = get_connection(&self.pool)?;
        let date = holding_snapshots::table
            .filter(holding_snapshots::fund_id.eq(fund_id))
            .filter(holding_snapshots::snapshot_date.le(fmt_date(snapshot_date)))
            .select(holding_snapshots::snapshot_date)
            .order(holding_snapshots::snapshot_date.desc())
            .first::<String>(&mut conn)
            .optional()
            .into_core()?;
        Ok(date.and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok()))
    }
}
