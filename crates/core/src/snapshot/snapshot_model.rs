//! Portfolio snapshot domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Denormalized copy of a holding as of the snapshot day.
///
/// Carried inside `PortfolioSnapshot.top_holdings` so history survives later
/// edits to the mutable holdings store. Display-only; diffing reads the full
/// `HoldingSnapshot` rows instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopHolding {
    pub stock_symbol: String,
    pub stock_name: String,
    pub percentage: Decimal,
    pub sector: String,
    pub market_value: Decimal,
}

/// Aggregate weight of one sector at the snapshot day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorAllocation {
    pub sector: String,
    /// Sum of holding weights in this sector, percentage points.
    pub percentage: Decimal,
    pub holdings_count: i64,
}

/// Concentration metrics computed over the whole portfolio.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioMetrics {
    pub top5_weight: Decimal,
    pub top10_weight: Decimal,
    pub top3_sector_weight: Decimal,
    /// Herfindahl-style index on percentage points: sum of squared weights
    /// over all holdings. Higher means more concentrated.
    pub diversification_score: Decimal,
}

/// Immutable portfolio-level record, one per fund per calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    /// `FUNDID_YYYY-MM-DD`
    pub id: String,
    pub fund_id: String,
    pub snapshot_date: NaiveDate,
    pub total_holdings: i64,
    pub total_market_value: Decimal,
    /// Top-10 holdings by weight, descending.
    pub top_holdings: Vec<TopHolding>,
    /// Sorted descending by summed percentage.
    pub sector_allocation: Vec<SectorAllocation>,
    pub portfolio_metrics: PortfolioMetrics,
    pub calculated_at: NaiveDateTime,
}

impl PortfolioSnapshot {
    pub fn make_id(fund_id: &str, snapshot_date: NaiveDate) -> String {
        format!("{}_{}", fund_id, snapshot_date.format("%Y-%m-%d"))
    }
}

/// Immutable per-holding record, one per fund per stock per calendar day.
///
/// Preferred over the truncated `top_holdings` list as ground truth for
/// diffing because it covers the whole portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingSnapshot {
    /// `FUNDID_SYMBOL_YYYY-MM-DD`
    pub id: String,
    pub fund_id: String,
    pub stock_symbol: String,
    pub stock_name: String,
    pub percentage: Decimal,
    pub sector: String,
    pub market_value: Decimal,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub quantity: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub one_month_change: Option<Decimal>,
    pub snapshot_date: NaiveDate,
    pub calculated_at: NaiveDateTime,
}

impl HoldingSnapshot {
    pub fn make_id(fund_id: &str, stock_symbol: &str, snapshot_date: NaiveDate) -> String {
        format!(
            "{}_{}_{}",
            fund_id,
            stock_symbol,
            snapshot_date.format("%Y-%m-%d")
        )
    }
}

/// Outcome counts of a bulk snapshot run across funds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotBatchSummary {
    /// Snapshots written for the first time today.
    pub created: usize,
    /// Funds whose snapshot for today already existed.
    pub skipped: usize,
    /// Funds with no current holdings to snapshot.
    pub empty: usize,
    /// Funds whose persistence failed; the run continued past them.
    pub failed: usize,
}
