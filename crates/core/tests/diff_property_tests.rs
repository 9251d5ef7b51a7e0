use std::collections::HashMap;

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use fundtrack_core::changes::{diff_states, ChangeType, PortfolioState, Significance, StateEntry};
use fundtrack_core::constants::{
    HIGH_SIGNIFICANCE_THRESHOLD, MEDIUM_SIGNIFICANCE_THRESHOLD, NOISE_THRESHOLD,
};

const SYMBOLS: &[&str] = &["AAA", "BBB", "CCC", "DDD", "EEE", "FFF", "GGG", "HHH"];

fn arb_entries() -> impl Strategy<Value = HashMap<String, StateEntry>> {
    proptest::collection::hash_map(
        proptest::sample::select(SYMBOLS).prop_map(String::from),
        (0i64..=10_000).prop_map(|hundredths| StateEntry {
            stock_name: "Some Stock".to_string(),
            percentage: Decimal::new(hundredths, 2),
            sector: "Tech".to_string(),
        }),
        0..8,
    )
}

fn state(day: NaiveDate, entries: HashMap<String, StateEntry>) -> PortfolioState {
    PortfolioState {
        snapshot_date: day,
        entries,
    }
}

fn base_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

fn target_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_membership_determines_change_type(
        base_entries in arb_entries(),
        target_entries in arb_entries(),
    ) {
        let base = state(base_day(), base_entries);
        let target = state(target_day(), target_entries);
        let changes = diff_states("FUND1", &base, &target, target_day().and_hms_opt(0, 0, 0).unwrap());

        for change in &changes {
            let in_base = base.entries.contains_key(&change.stock_symbol);
            let in_target = target.entries.contains_key(&change.stock_symbol);
            match change.change_type {
                ChangeType::Addition => {
                    prop_assert!(!in_base && in_target);
                    prop_assert_eq!(change.previous_percentage, Decimal::ZERO);
                }
                ChangeType::Exit => {
                    prop_assert!(in_base && !in_target);
                    prop_assert_eq!(change.current_percentage, Decimal::ZERO);
                }
                ChangeType::Increase => {
                    prop_assert!(in_base && in_target);
                    prop_assert!(change.change_amount > Decimal::ZERO);
                }
                ChangeType::Decrease => {
                    prop_assert!(in_base && in_target);
                    prop_assert!(change.change_amount < Decimal::ZERO);
                }
            }
        }
    }

    #[test]
    fn prop_weight_moves_above_noise_and_amounts_consistent(
        base_entries in arb_entries(),
        target_entries in arb_entries(),
    ) {
        let base = state(base_day(), base_entries);
        let target = state(target_day(), target_entries);
        let changes = diff_states("FUND1", &base, &target, target_day().and_hms_opt(0, 0, 0).unwrap());

        for change in &changes {
            prop_assert_eq!(
                change.change_amount,
                change.current_percentage - change.previous_percentage
            );
            if matches!(change.change_type, ChangeType::Increase | ChangeType::Decrease) {
                prop_assert!(change.change_amount.abs() > NOISE_THRESHOLD);
            }
        }
    }

    #[test]
    fn prop_significance_matches_magnitude(
        base_entries in arb_entries(),
        target_entries in arb_entries(),
    ) {
        let base = state(base_day(), base_entries);
        let target = state(target_day(), target_entries);
        let changes = diff_states("FUND1", &base, &target, target_day().and_hms_opt(0, 0, 0).unwrap());

        for change in &changes {
            let magnitude = change.change_amount.abs();
            let expected = if magnitude >= HIGH_SIGNIFICANCE_THRESHOLD {
                Significance::High
            } else if magnitude >= MEDIUM_SIGNIFICANCE_THRESHOLD {
                Significance::Medium
            } else {
                Significance::Low
            };
            prop_assert_eq!(change.significance, expected);
        }
    }

    #[test]
    fn prop_each_symbol_appears_at_most_once_sorted_by_magnitude(
        base_entries in arb_entries(),
        target_entries in arb_entries(),
    ) {
        let base = state(base_day(), base_entries);
        let target = state(target_day(), target_entries);
        let changes = diff_states("FUND1", &base, &target, target_day().and_hms_opt(0, 0, 0).unwrap());

        let mut seen: Vec<&str> = changes.iter().map(|c| c.stock_symbol.as_str()).collect();
        seen.sort_unstable();
        let before = seen.len();
        seen.dedup();
        prop_assert_eq!(before, seen.len());

        for pair in changes.windows(2) {
            prop_assert!(pair[0].change_amount.abs() >= pair[1].change_amount.abs());
        }
    }

    #[test]
    fn prop_unchanged_portfolio_yields_no_changes(entries in arb_entries()) {
        let base = state(base_day(), entries.clone());
        let target = state(target_day(), entries);
        let changes = diff_states("FUND1", &base, &target, target_day().and_hms_opt(0, 0, 0).unwrap());
        prop_assert!(changes.is_empty());
    }
}
