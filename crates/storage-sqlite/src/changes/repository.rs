use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::SqliteConnection;

use fundtrack_core::changes::{ChangeRepositoryTrait, PortfolioChange, Significance};
use fundtrack_core::Result;

use super::model::PortfolioChangeDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::portfolio_changes;

pub struct ChangeRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl ChangeRepository {
    pub fn new(
        pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        ChangeRepository { pool, writer }
    }
}

/// Newest day first, then largest absolute move. Decimal columns are text,
/// so magnitude ordering happens here rather than in SQL.
fn sort_changes(changes: &mut [PortfolioChange]) {
    changes.sort_by(|a, b| {
        b.change_date
            .cmp(&a.change_date)
            .then_with(|| b.change_amount.abs().cmp(&a.change_amount.abs()))
    });
}

#[async_trait]
impl ChangeRepositoryTrait for ChangeRepository {
    async fn save_changes(&self, changes: Vec<PortfolioChange>) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let mut inserted = 0;
                for change in changes {
                    let db: PortfolioChangeDB = change.into();
                    // The unique (fund, day, symbol, kind) index makes
                    // repeated detection runs no-ops.
                    inserted += diesel::insert_into(portfolio_changes::table)
                        .values(&db)
                        .on_conflict_do_nothing()
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(inserted)
            })
            .await
    }

    fn get_changes_since(&self, fund_id: &str, since: NaiveDate) -> Result<Vec<PortfolioChange>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = portfolio_changes::table
            .filter(portfolio_changes::fund_id.eq(fund_id))
            .filter(portfolio_changes::change_date.ge(since.format("%Y-%m-%d").to_string()))
            .load::<PortfolioChangeDB>(&mut conn)
            .into_core()?;
        let mut changes = rows
            .into_iter()
            .map(PortfolioChange::try_from)
            .collect::<Result<Vec<_>>>()?;
        sort_changes(&mut changes);
        Ok(changes)
    }

    fn get_significant_changes_since(&self, since: NaiveDate) -> Result<Vec<PortfolioChange>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = portfolio_changes::table
            .filter(portfolio_changes::change_date.ge(since.format("%Y-%m-%d").to_string()))
            .filter(portfolio_changes::significance.ne(Significance::Low.as_str()))
            .load::<PortfolioChangeDB>(&mut conn)
            .into_core()?;
        let mut changes = rows
            .into_iter()
            .map(PortfolioChange::try_from)
            .collect::<Result<Vec<_>>>()?;
        sort_changes(&mut changes);
        Ok(changes)
    }
}
