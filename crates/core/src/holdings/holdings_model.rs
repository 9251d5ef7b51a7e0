//! Current-holdings domain model.
//!
//! A `Holding` is one stock position in a fund's *current* portfolio, owned
//! and overwritten wholesale by the ingestion pipeline. The engine only reads
//! these rows; the immutable history lives in the snapshot module.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One stock position within a fund's current portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub fund_id: String,
    /// Unique within a fund together with `fund_id`.
    pub stock_symbol: String,
    pub stock_name: String,
    /// Portfolio weight in percentage points (0-100).
    pub percentage: Decimal,
    pub sector: String,
    pub market_value: Decimal,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub quantity: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub one_month_change: Option<Decimal>,
}
