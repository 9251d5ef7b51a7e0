//! Pure portfolio diff.
//!
//! Compares two keyed portfolio states and emits one change per moved
//! position. Noise-level weight drift is dropped here so callers never see
//! sub-threshold churn.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::changes::changes_model::{ChangeType, PortfolioChange, PortfolioState, Significance};
use crate::constants::NOISE_THRESHOLD;

/// Diffs two states of the same fund, `base` being the older one.
///
/// Emits ADDITION and EXIT for symbols present on only one side, INCREASE
/// and DECREASE for weight moves strictly above the noise threshold. Output
/// is sorted by absolute change amount, largest first. `change_date` is the
/// target state's day.
pub fn diff_states(
    fund_id: &str,
    base: &PortfolioState,
    target: &PortfolioState,
    detected_at: NaiveDateTime,
) -> Vec<PortfolioChange> {
    let mut changes: Vec<PortfolioChange> = Vec::new();

    for (symbol, current) in &target.entries {
        match base.entries.get(symbol) {
            None => {
                changes.push(make_change(
                    fund_id,
                    symbol,
                    &current.stock_name,
                    &current.sector,
                    ChangeType::Addition,
                    Decimal::ZERO,
                    current.percentage,
                    target,
                    detected_at,
                ));
            }
            Some(previous) => {
                let delta = current.percentage - previous.percentage;
                if delta.abs() <= NOISE_THRESHOLD {
                    continue;
                }
                let change_type = if delta > Decimal::ZERO {
                    ChangeType::Increase
                } else {
                    ChangeType::Decrease
                };
                changes.push(make_change(
                    fund_id,
                    symbol,
                    &current.stock_name,
                    &current.sector,
                    change_type,
                    previous.percentage,
                    current.percentage,
                    target,
                    detected_at,
                ));
            }
        }
    }

    for (symbol, previous) in &base.entries {
        if !target.entries.contains_key(symbol) {
            changes.push(make_change(
                fund_id,
                symbol,
                &previous.stock_name,
                &previous.sector,
                ChangeType::Exit,
                previous.percentage,
                Decimal::ZERO,
                target,
                detected_at,
            ));
        }
    }

    changes.sort_by(|a, b| b.change_amount.abs().cmp(&a.change_amount.abs()));
    changes
}

#[allow(clippy::too_many_arguments)]
fn make_change(
    fund_id: &str,
    symbol: &str,
    stock_name: &str,
    sector: &str,
    change_type: ChangeType,
    previous_percentage: Decimal,
    current_percentage: Decimal,
    target: &PortfolioState,
    detected_at: NaiveDateTime,
) -> PortfolioChange {
    let change_amount = current_percentage - previous_percentage;
    PortfolioChange {
        id: Uuid::new_v4().to_string(),
        fund_id: fund_id.to_string(),
        stock_symbol: symbol.to_string(),
        stock_name: stock_name.to_string(),
        change_type,
        previous_percentage,
        current_percentage,
        change_amount,
        significance: Significance::classify(change_amount.abs()),
        sector: sector.to_string(),
        change_date: target.snapshot_date,
        detected_at,
    }
}
