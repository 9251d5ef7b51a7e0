//! Database model for detected portfolio changes.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use fundtrack_core::changes::{ChangeType, PortfolioChange, Significance};
use fundtrack_core::constants::DECIMAL_PRECISION;
use fundtrack_core::errors::Error;

/// Database model for one detected position movement.
#[derive(Queryable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::portfolio_changes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct PortfolioChangeDB {
    pub id: String,
    pub fund_id: String,
    pub stock_symbol: String,
    pub stock_name: String,
    pub change_type: String,
    pub previous_percentage: String,
    pub current_percentage: String,
    pub change_amount: String,
    pub significance: String,
    pub sector: String,
    pub change_date: String,
    pub detected_at: String,
}

// Fallible: the enum columns must hold known discriminants.
impl TryFrom<PortfolioChangeDB> for PortfolioChange {
    type Error = Error;

    fn try_from(db: PortfolioChangeDB) -> Result<Self, Self::Error> {
        Ok(Self {
            id: db.id,
            fund_id: db.fund_id,
            stock_symbol: db.stock_symbol,
            stock_name: db.stock_name,
            change_type: ChangeType::from_str(&db.change_type)?,
            previous_percentage: Decimal::from_str(&db.previous_percentage).unwrap_or_default(),
            current_percentage: Decimal::from_str(&db.current_percentage).unwrap_or_default(),
            change_amount: Decimal::from_str(&db.change_amount).unwrap_or_default(),
            significance: Significance::from_str(&db.significance)?,
            sector: db.sector,
            change_date: NaiveDate::parse_from_str(&db.change_date, "%Y-%m-%d")
                .unwrap_or_default(),
            detected_at: NaiveDateTime::parse_from_str(&db.detected_at, "%Y-%m-%dT%H:%M:%S%.fZ")
                .unwrap_or_else(|_| Utc::now().naive_utc()),
        })
    }
}

impl From<PortfolioChange> for PortfolioChangeDB {
    fn from(domain: PortfolioChange) -> Self {
        Self {
            id: domain.id,
            fund_id: domain.fund_id,
            stock_symbol: domain.stock_symbol,
            stock_name: domain.stock_name,
            change_type: domain.change_type.as_str().to_string(),
            previous_percentage: domain
                .previous_percentage
                .round_dp(DECIMAL_PRECISION)
                .to_string(),
            current_percentage: domain
                .current_percentage
                .round_dp(DECIMAL_PRECISION)
                .to_string(),
            change_amount: domain.change_amount.round_dp(DECIMAL_PRECISION).to_string(),
            significance: domain.significance.as_str().to_string(),
            sector: domain.sector,
            change_date: domain.change_date.format("%Y-%m-%d").to_string(),
            detected_at: domain
                .detected_at
                .format("%Y-%m-%dT%H:%M:%S%.fZ")
                .to_string(),
        }
    }
}
