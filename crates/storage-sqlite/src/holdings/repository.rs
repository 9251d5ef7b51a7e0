use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::SqliteConnection;

use fundtrack_core::holdings::{Holding, HoldingsRepositoryTrait};
use fundtrack_core::Result;

use super::model::HoldingDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::holdings;

pub struct HoldingsRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl HoldingsRepository {
    pub fn new(
        pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        HoldingsRepository { pool, writer }
    }
}

#[async_trait]
impl HoldingsRepositoryTrait for HoldingsRepository {
    fn get_holdings_by_fund(&self, fund_id: &str) -> Result<Vec<Holding>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = holdings::table
            .filter(holdings::fund_id.eq(fund_id))
            .load::<HoldingDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Holding::from).collect())
    }

    fn get_fund_ids(&self) -> Result<Vec<String>> {
        let mut conn = get_connection(&self.pool)?;
        holdings::table
            .select(holdings::fund_id)
            .distinct()
            .order(holdings::fund_id.asc())
            .load::<String>(&mut conn)
            .into_core()
    }

    async fn replace_holdings(&self, fund_id: String, new_holdings: Vec<Holding>) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(holdings::table.filter(holdings::fund_id.eq(&fund_id)))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let rows: Vec<HoldingDB> =
                    new_holdings.into_iter().map(HoldingDB::from).collect();
                let inserted = diesel::insert_into(holdings::table)
                    .values(&rows)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(inserted)
            })
            .await
    }
}
