//! Database model for current holdings.

use chrono::Utc;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use fundtrack_core::constants::DECIMAL_PRECISION;
use fundtrack_core::holdings::Holding;

/// Database model for one current position. `updated_at` exists only in the
/// database; it records the last wholesale overwrite of the fund.
#[derive(Queryable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::holdings)]
#[diesel(primary_key(fund_id, stock_symbol))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct HoldingDB {
    pub fund_id: String,
    pub stock_symbol: String,
    pub stock_name: String,
    pub percentage: String,
    pub sector: String,
    pub market_value: String,
    pub quantity: Option<String>,
    pub one_month_change: Option<String>,
    pub updated_at: String,
}

impl From<HoldingDB> for Holding {
    fn from(db: HoldingDB) -> Self {
        Self {
            fund_id: db.fund_id,
            stock_symbol: db.stock_symbol,
            stock_name: db.stock_name,
            percentage: Decimal::from_str(&db.percentage).unwrap_or_default(),
            sector: db.sector,
            market_value: Decimal::from_str(&db.market_value).unwrap_or_default(),
            quantity: db.quantity.and_then(|s| Decimal::from_str(&s).ok()),
            one_month_change: db.one_month_change.and_then(|s| Decimal::from_str(&s).ok()),
        }
    }
}

impl From<Holding> for HoldingDB {
    fn from(domain: Holding) -> Self {
        Self {
            fund_id: domain.fund_id,
            stock_symbol: domain.stock_symbol,
            stock_name: domain.stock_name,
            percentage: domain.percentage.round_dp(DECIMAL_PRECISION).to_string(),
            sector: domain.sector,
            market_value: domain.market_value.round_dp(DECIMAL_PRECISION).to_string(),
            quantity: domain
                .quantity
                .map(|q| q.round_dp(DECIMAL_PRECISION).to_string()),
            one_month_change: domain
                .one_month_change
                .map(|c| c.round_dp(DECIMAL_PRECISION).to_string()),
            updated_at: Utc::now()
                .naive_utc()
                .format("%Y-%m-%dT%H:%M:%S%.fZ")
                .to_string(),
        }
    }
}
