//! Database models for portfolio and holding snapshots.
//!
//! Nested structures (top holdings, sector allocation, metrics) are stored
//! as JSON text; decimals and dates are stored as text.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use fundtrack_core::constants::DECIMAL_PRECISION;
use fundtrack_core::snapshot::{HoldingSnapshot, PortfolioSnapshot};

/// Database model for portfolio snapshots.
#[derive(Queryable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::portfolio_snapshots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshotDB {
    pub id: String,
    pub fund_id: String,
    pub snapshot_date: String,
    pub total_holdings: i64,
    pub total_market_value: String,
    pub top_holdings: String,
    pub sector_allocation: String,
    pub portfolio_metrics: String,
    pub calculated_at: String,
}

impl From<PortfolioSnapshotDB> for PortfolioSnapshot {
    fn from(db: PortfolioSnapshotDB) -> Self {
        Self {
            id: db.id,
            fund_id: db.fund_id,
            snapshot_date: NaiveDate::parse_from_str(&db.snapshot_date, "%Y-%m-%d")
                .unwrap_or_default(),
            total_holdings: db.total_holdings,
            total_market_value: Decimal::from_str(&db.total_market_value).unwrap_or_default(),
            top_holdings: serde_json::from_str(&db.top_holdings).unwrap_or_default(),
            sector_allocation: serde_json::from_str(&db.sector_allocation).unwrap_or_default(),
            portfolio_metrics: serde_json::from_str(&db.portfolio_metrics).unwrap_or_default(),
            calculated_at: NaiveDateTime::parse_from_str(
                &db.calculated_at,
                "%Y-%m-%dT%H:%M:%S%.fZ",
            )
            .unwrap_or_else(|e| {
                log::error!("Failed to parse DB calculated_at '{}': {}", db.calculated_at, e);
                Utc::now().naive_utc()
            }),
        }
    }
}

impl From<PortfolioSnapshot> for PortfolioSnapshotDB {
    fn from(domain: PortfolioSnapshot) -> Self {
        Self {
            id: domain.id,
            fund_id: domain.fund_id,
            snapshot_date: domain.snapshot_date.format("%Y-%m-%d").to_string(),
            total_holdings: domain.total_holdings,
            total_market_value: domain
                .total_market_value
                .round_dp(DECIMAL_PRECISION)
                .to_string(),
            top_holdings: serde_json::to_string(&domain.top_holdings)
                .unwrap_or_else(|_| "[]".to_string()),
            sector_allocation: serde_json::to_string(&domain.sector_allocation)
                .unwrap_or_else(|_| "[]".to_string()),
            portfolio_metrics: serde_json::to_string(&domain.portfolio_metrics)
                .unwrap_or_else(|_| "{}".to_string()),
            calculated_at: domain
                .calculated_at
                .format("%Y-%m-%dT%H:%M:%S%.fZ")
                .to_string(),
        }
    }
}

/// Database model for per-holding history rows.
#[derive(Queryable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::holding_snapshots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct HoldingSnapshotDB {
    pub id: String,
    pub fund_id: String,
    pub stock_symbol: String,
    pub stock_name: String,
    pub percentage: String,
    pub sector: String,
    pub market_value: String,
    pub quantity: Option<String>,
    pub one_month_change: Option<String>,
    pub snapshot_date: String,
    pub calculated_at: String,
}

impl From<HoldingSnapshotDB> for HoldingSnapshot {
    fn from(db: HoldingSnapshotDB) -> Self {
        Self {
            id: db.id,
            fund_id: db.fund_id,
            stock_symbol: db.stock_symbol,
            stock_name: db.stock_name,
            percentage: Decimal::from_str(&db.percentage).unwrap_or_default(),
            sector: db.sector,
            market_value: Decimal::from_str(&db.market_value).unwrap_or_default(),
            quantity: db.quantity.and_then(|s| Decimal::from_str(&s).ok()),
            one_month_change: db.one_month_change.and_then(|s| Decimal::from_str(&s).ok()),
            snapshot_date: NaiveDate::parse_from_str(&db.snapshot_date, "%Y-%m-%d")
                .unwrap_or_default(),
            calculated_at: NaiveDateTime::parse_from_str(
                &db.calculated_at,
                "%Y-%m-%dT%H:%M:%S%.fZ",
            )
            .unwrap_or_else(|_| Utc::now().naive_utc()),
        }
    }
}

impl From<HoldingSnapshot> for HoldingSnapshotDB {
    fn from(domain: HoldingSnapshot) -> Self {
        Self {
            id: domain.id,
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
            snapshot_date: domain.snapshot_date.format("%Y-%m-%d").to_string(),
            calculated_at: domain
                .calculated_at
                .format("%Y-%m-%dT%H:%M:%S%.fZ")
                .to_string(),
        }
    }
}
