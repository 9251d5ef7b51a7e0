//! Change-detection domain models.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{HIGH_SIGNIFICANCE_THRESHOLD, MEDIUM_SIGNIFICANCE_THRESHOLD};
use crate::errors::{Error, ValidationError};
use crate::snapshot::{HoldingSnapshot, PortfolioSnapshot};

/// Kind of position movement between two portfolio states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeType {
    Addition,
    Exit,
    Increase,
    Decrease,
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::Addition => "ADDITION",
            ChangeType::Exit => "EXIT",
            ChangeType::Increase => "INCREASE",
            ChangeType::Decrease => "DECREASE",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADDITION" => Ok(ChangeType::Addition),
            "EXIT" => Ok(ChangeType::Exit),
            "INCREASE" => Ok(ChangeType::Increase),
            "DECREASE" => Ok(ChangeType::Decrease),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown change type: {}",
                other
            ))
            .into()),
        }
    }
}

/// Severity bucket derived from the magnitude of a weight move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Significance {
    Low,
    Medium,
    High,
}

impl Significance {
    /// Classifies an absolute magnitude in percentage points.
    pub fn classify(magnitude: Decimal) -> Self {
        if magnitude >= HIGH_SIGNIFICANCE_THRESHOLD {
            Significance::High
        } else if magnitude >= MEDIUM_SIGNIFICANCE_THRESHOLD {
            Significance::Medium
        } else {
            Significance::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Significance::Low => "LOW",
            Significance::Medium => "MEDIUM",
            Significance::High => "HIGH",
        }
    }
}

impl fmt::Display for Significance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Significance {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(Significance::Low),
            "MEDIUM" => Ok(Significance::Medium),
            "HIGH" => Ok(Significance::High),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown significance: {}",
                other
            ))
            .into()),
        }
    }
}

/// One detected position movement between two portfolio states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioChange {
    pub id: String,
    pub fund_id: String,
    pub stock_symbol: String,
    pub stock_name: String,
    pub change_type: ChangeType,
    /// Weight before the move, percentage points. Zero for additions.
    pub previous_percentage: Decimal,
    /// Weight after the move, percentage points. Zero for exits.
    pub current_percentage: Decimal,
    /// Signed delta in percentage points: positive for additions and
    /// increases, negative for exits and decreases.
    pub change_amount: Decimal,
    pub significance: Significance,
    pub sector: String,
    /// Day of the newer of the two compared states.
    pub change_date: NaiveDate,
    pub detected_at: NaiveDateTime,
}

/// One fund's portfolio at a single day, keyed by symbol for diffing.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioState {
    pub snapshot_date: NaiveDate,
    pub entries: HashMap<String, StateEntry>,
}

/// Per-symbol slice of a portfolio state.
#[derive(Debug, Clone, PartialEq)]
pub struct StateEntry {
    pub stock_name: String,
    pub percentage: Decimal,
    pub sector: String,
}

impl PortfolioState {
    /// Builds a state from full per-holding history rows. Preferred source;
    /// covers the entire portfolio.
    pub fn from_holding_snapshots(
        snapshot_date: NaiveDate,
        rows: &[HoldingSnapshot],
    ) -> Self {
        let entries = rows
            .iter()
            .map(|r| {
                (
                    r.stock_symbol.clone(),
                    StateEntry {
                        stock_name: r.stock_name.clone(),
                        percentage: r.percentage,
                        sector: r.sector.clone(),
                    },
                )
            })
            .collect();
        Self {
            snapshot_date,
            entries,
        }
    }

    /// Fallback built from a snapshot's truncated top list, for days
    /// predating per-holding history.
    pub fn from_snapshot(snapshot: &PortfolioSnapshot) -> Self {
        let entries = snapshot
            .top_holdings
            .iter()
            .map(|h| {
                (
                    h.stock_symbol.clone(),
                    StateEntry {
                        stock_name: h.stock_name.clone(),
                        percentage: h.percentage,
                        sector: h.sector.clone(),
                    },
                )
            })
            .collect();
        Self {
            snapshot_date: snapshot.snapshot_date,
            entries,
        }
    }
}
