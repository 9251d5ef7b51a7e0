//! Pure snapshot aggregation.
//!
//! Everything here is deterministic over the input holdings; persistence and
//! date handling live in the service layer.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::constants::{TOP_5_LIMIT, TOP_HOLDINGS_LIMIT, TOP_SECTORS_LIMIT};
use crate::holdings::Holding;
use crate::snapshot::snapshot_model::{
    HoldingSnapshot, PortfolioMetrics, PortfolioSnapshot, SectorAllocation, TopHolding,
};

/// Builds a portfolio snapshot from one fund's current holdings.
///
/// Returns `None` when the fund has no holdings; an empty portfolio produces
/// no snapshot rather than a zeroed one.
pub fn calculate_snapshot(
    fund_id: &str,
    snapshot_date: NaiveDate,
    calculated_at: NaiveDateTime,
    holdings: &[Holding],
) -> Option<PortfolioSnapshot> {
    if holdings.is_empty() {
        return None;
    }

    let mut sorted: Vec<&Holding> = holdings.iter().collect();
    sorted.sort_by(|a, b| b.percentage.cmp(&a.percentage));

    let total_market_value: Decimal = sorted.iter().map(|h| h.market_value).sum();

    let top_holdings: Vec<TopHolding> = sorted
        .iter()
        .take(TOP_HOLDINGS_LIMIT)
        .map(|h| TopHolding {
            stock_symbol: h.stock_symbol.clone(),
            stock_name: h.stock_name.clone(),
            percentage: h.percentage,
            sector: h.sector.clone(),
            market_value: h.market_value,
        })
        .collect();

    let sector_allocation = calculate_sector_allocation(&sorted);

    let top5_weight: Decimal = sorted.iter().take(TOP_5_LIMIT).map(|h| h.percentage).sum();
    let top10_weight: Decimal = sorted
        .iter()
        .take(TOP_HOLDINGS_LIMIT)
        .map(|h| h.percentage)
        .sum();
    let top3_sector_weight: Decimal = sector_allocation
        .iter()
        .take(TOP_SECTORS_LIMIT)
        .map(|s| s.percentage)
        .sum();
    let diversification_score: Decimal = sorted.iter().map(|h| h.percentage * h.percentage).sum();

    Some(PortfolioSnapshot {
        id: PortfolioSnapshot::make_id(fund_id, snapshot_date),
        fund_id: fund_id.to_string(),
        snapshot_date,
        total_holdings: sorted.len() as i64,
        total_market_value,
        top_holdings,
        sector_allocation,
        portfolio_metrics: PortfolioMetrics {
            top5_weight,
            top10_weight,
            top3_sector_weight,
            diversification_score,
        },
        calculated_at,
    })
}

/// Groups holdings by sector and sums weights, sorted descending by weight.
fn calculate_sector_allocation(sorted: &[&Holding]) -> Vec<SectorAllocation> {
    let mut by_sector: HashMap<&str, (Decimal, i64)> = HashMap::new();
    for h in sorted {
        let entry = by_sector.entry(h.sector.as_str()).or_default();
        entry.0 += h.percentage;
        entry.1 += 1;
    }

    let mut allocation: Vec<SectorAllocation> = by_sector
        .into_iter()
        .map(|(sector, (percentage, holdings_count))| SectorAllocation {
            sector: sector.to_string(),
            percentage,
            holdings_count,
        })
        .collect();
    allocation.sort_by(|a, b| b.percentage.cmp(&a.percentage));
    allocation
}

/// Materializes per-holding history rows for the snapshot day, covering the
/// whole portfolio rather than only the top list.
pub fn to_holding_snapshots(
    fund_id: &str,
    snapshot_date: NaiveDate,
    calculated_at: NaiveDateTime,
    holdings: &[Holding],
) -> Vec<HoldingSnapshot> {
    holdings
        .iter()
        .map(|h| HoldingSnapshot {
            id: HoldingSnapshot::make_id(fund_id, &h.stock_symbol, snapshot_date),
            fund_id: fund_id.to_string(),
            stock_symbol: h.stock_symbol.clone(),
            stock_name: h.stock_name.clone(),
            percentage: h.percentage,
            sector: h.sector.clone(),
            market_value: h.market_value,
            quantity: h.quantity,
            one_month_change: h.one_month_change,
            snapshot_date,
            calculated_at,
        })
        .collect()
}
