use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Number of holdings carried in a snapshot's denormalized top list
pub const TOP_HOLDINGS_LIMIT: usize = 10;

/// Window size for the top-5 concentration metric
pub const TOP_5_LIMIT: usize = 5;

/// Number of sectors summed into the top-3 sector weight
pub const TOP_SECTORS_LIMIT: usize = 3;

/// Decimal precision when persisting weights and market values
pub const DECIMAL_PRECISION: u32 = 6;

/// Weight moves at or below this many percentage points are ignored as noise
pub const NOISE_THRESHOLD: Decimal = dec!(0.1);

/// Magnitude (percentage points) at or above which a change is HIGH
pub const HIGH_SIGNIFICANCE_THRESHOLD: Decimal = dec!(2.0);

/// Magnitude (percentage points) at or above which a change is MEDIUM
pub const MEDIUM_SIGNIFICANCE_THRESHOLD: Decimal = dec!(0.5);

/// Default trailing window for per-fund change history
pub const DEFAULT_CHANGE_HISTORY_DAYS: i64 = 30;

/// Default trailing window for the global significant-changes feed
pub const DEFAULT_SIGNIFICANT_CHANGES_DAYS: i64 = 7;
