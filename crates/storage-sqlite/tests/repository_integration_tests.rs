//! Integration tests running the repositories against a real SQLite file
//! with migrations applied.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::TempDir;
use uuid::Uuid;

use fundtrack_core::changes::{
    ChangeRepositoryTrait, ChangeType, PortfolioChange, Significance,
};
use fundtrack_core::holdings::{Holding, HoldingsRepositoryTrait};
use fundtrack_core::snapshot::{
    HoldingSnapshot, PortfolioMetrics, PortfolioSnapshot, SnapshotRepositoryTrait, TopHolding,
};
use fundtrack_storage_sqlite::changes::ChangeRepository;
use fundtrack_storage_sqlite::holdings::HoldingsRepository;
use fundtrack_storage_sqlite::snapshot::SnapshotRepository;
use fundtrack_storage_sqlite::{create_pool, init, run_migrations, spawn_writer, DbPool, WriteHandle};

async fn setup() -> (TempDir, Arc<DbPool>, WriteHandle) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = init(dir.path().to_str().unwrap()).unwrap();
    let pool = create_pool(&db_path).unwrap();
    run_migrations(&pool).unwrap();
    let writer = spawn_writer((*pool).clone());
    (dir, pool, writer)
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
}

fn at(d: u32) -> NaiveDateTime {
    day(d).and_hms_opt(8, 0, 0).unwrap()
}

fn holding(fund_id: &str, symbol: &str, percentage: Decimal) -> Holding {
    Holding {
        fund_id: fund_id.to_string(),
        stock_symbol: symbol.to_string(),
        stock_name: format!("{} Inc", symbol),
        percentage,
        sector: "Tech".to_string(),
        market_value: percentage * dec!(100),
        quantity: Some(dec!(1000)),
        one_month_change: None,
    }
}

fn snapshot(fund_id: &str, d: u32) -> PortfolioSnapshot {
    PortfolioSnapshot {
        id: PortfolioSnapshot::make_id(fund_id, day(d)),
        fund_id: fund_id.to_string(),
        snapshot_date: day(d),
        total_holdings: 1,
        total_market_value: dec!(1000),
        top_holdings: vec![TopHolding {
            stock_symbol: "AAA".to_string(),
            stock_name: "AAA Inc".to_string(),
            percentage: dec!(100),
            sector: "Tech".to_string(),
            market_value: dec!(1000),
        }],
        sector_allocation: Vec::new(),
        portfolio_metrics: PortfolioMetrics {
            top5_weight: dec!(100),
            top10_weight: dec!(100),
            top3_sector_weight: dec!(100),
            diversification_score: dec!(10000),
        },
        calculated_at: at(d),
    }
}

fn holding_snapshot(fund_id: &str, symbol: &str, percentage: Decimal, d: u32) -> HoldingSnapshot {
    HoldingSnapshot {
        id: HoldingSnapshot::make_id(fund_id, symbol, day(d)),
        fund_id: fund_id.to_string(),
        stock_symbol: symbol.to_string(),
        stock_name: format!("{} Inc", symbol),
        percentage,
        sector: "Tech".to_string(),
        market_value: percentage * dec!(100),
        quantity: None,
        one_month_change: None,
        snapshot_date: day(d),
        calculated_at: at(d),
    }
}

fn change(
    fund_id: &str,
    symbol: &str,
    amount: Decimal,
    significance: Significance,
    d: u32,
) -> PortfolioChange {
    PortfolioChange {
        id: Uuid::new_v4().to_string(),
        fund_id: fund_id.to_string(),
        stock_symbol: symbol.to_string(),
        stock_name: format!("{} Inc", symbol),
        change_type: if amount >= Decimal::ZERO {
            ChangeType::Increase
        } else {
            ChangeType::Decrease
        },
        previous_percentage: dec!(10),
        current_percentage: dec!(10) + amount,
        change_amount: amount,
        significance,
        sector: "Tech".to_string(),
        change_date: day(d),
        detected_at: day(d).and_hms_opt(9, 0, 0).unwrap(),
    }
}

#[tokio::test]
async fn test_replace_holdings_overwrites_wholesale() {
    let (_dir, pool, writer) = setup().await;
    let repo = HoldingsRepository::new(pool, writer);

    repo.replace_holdings(
        "FUND1".to_string(),
        vec![holding("FUND1", "AAA", dec!(60)), holding("FUND1", "BBB", dec!(40))],
    )
    .await
    .unwrap();
    repo.replace_holdings("FUND2".to_string(), vec![holding("FUND2", "CCC", dec!(100))])
        .await
        .unwrap();

    let count = repo
        .replace_holdings(
            "FUND1".to_string(),
            vec![holding("FUND1", "DDD", dec!(100))],
        )
        .await
        .unwrap();
    assert_eq!(count, 1);

    let holdings = repo.get_holdings_by_fund("FUND1").unwrap();
    assert_eq!(holdings.len(), 1);
    assert_eq!(holdings[0].stock_symbol, "DDD");
    assert_eq!(holdings[0].percentage, dec!(100));
    assert_eq!(holdings[0].quantity, Some(dec!(1000)));

    assert_eq!(repo.get_fund_ids().unwrap(), vec!["FUND1", "FUND2"]);
}

#[tokio::test]
async fn test_save_snapshot_is_idempotent_per_day() {
    let (_dir, pool, writer) = setup().await;
    let repo = SnapshotRepository::new(pool, writer);

    assert!(repo.save_snapshot(snapshot("FUND1", 2)).await.unwrap());
    assert!(!repo.save_snapshot(snapshot("FUND1", 2)).await.unwrap());
    assert!(repo.save_snapshot(snapshot("FUND1", 3)).await.unwrap());

    let stored = repo.get_snapshot("FUND1", day(2)).unwrap().unwrap();
    assert_eq!(stored.id, "FUND1_2025-06-02");
    assert_eq!(stored.top_holdings.len(), 1);
    assert_eq!(stored.portfolio_metrics.diversification_score, dec!(10000));
}

#[tokio::test]
async fn test_snapshot_date_resolution_and_ranges() {
    let (_dir, pool, writer) = setup().await;
    let repo = SnapshotRepository::new(pool, writer);
    for d in [1, 3, 5] {
        repo.save_snapshot(snapshot("FUND1", d)).await.unwrap();
    }
    repo.save_snapshot(snapshot("FUND2", 4)).await.unwrap();

    let resolved = repo
        .get_latest_snapshot_on_or_before("FUND1", day(4))
        .unwrap()
        .unwrap();
    assert_eq!(resolved.snapshot_date, day(3));
    assert!(repo
        .get_latest_snapshot_on_or_before("FUND2", day(3))
        .unwrap()
        .is_none());

    let latest = repo.get_latest_snapshots("FUND1", 2).unwrap();
    assert_eq!(latest.len(), 2);
    assert_eq!(latest[0].snapshot_date, day(5));
    assert_eq!(latest[1].snapshot_date, day(3));

    let ranged = repo
        .get_snapshots_by_fund("FUND1", Some(day(2)), Some(day(4)))
        .unwrap();
    assert_eq!(ranged.len(), 1);
    assert_eq!(ranged[0].snapshot_date, day(3));

    let all = repo.get_snapshots_by_fund("FUND1", None, None).unwrap();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn test_holding_snapshots_conflict_skip_and_lookup() {
    let (_dir, pool, writer) = setup().await;
    let repo = SnapshotRepository::new(pool, writer);

    let inserted = repo
        .save_holding_snapshots(vec![
            holding_snapshot("FUND1", "AAA", dec!(60), 1),
            holding_snapshot("FUND1", "BBB", dec!(40), 1),
            holding_snapshot("FUND1", "AAA", dec!(55), 2),
        ])
        .await
        .unwrap();
    assert_eq!(inserted, 3);

    // Re-inserting the same (fund, symbol, day) rows is a no-op.
    let inserted = repo
        .save_holding_snapshots(vec![
            holding_snapshot("FUND1", "AAA", dec!(70), 1),
            holding_snapshot("FUND1", "CCC", dec!(5), 2),
        ])
        .await
        .unwrap();
    assert_eq!(inserted, 1);

    let rows = repo.get_holding_snapshots_for_date("FUND1", day(1)).unwrap();
    assert_eq!(rows.len(), 2);
    let aaa = rows.iter().find(|r| r.stock_symbol == "AAA").unwrap();
    assert_eq!(aaa.percentage, dec!(60));

    let dates = repo.get_holding_snapshot_dates("FUND1", 10).unwrap();
    assert_eq!(dates, vec![day(2), day(1)]);

    let resolved = repo
        .get_latest_holding_snapshot_date_on_or_before("FUND1", day(9))
        .unwrap();
    assert_eq!(resolved, Some(day(2)));
    assert!(repo
        .get_latest_holding_snapshot_date_on_or_before("FUND2", day(9))
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_save_changes_skips_duplicates() {
    let (_dir, pool, writer) = setup().await;
    let repo = ChangeRepository::new(pool, writer);

    let first = change("FUND1", "AAA", dec!(3), Significance::High, 2);
    let inserted = repo.save_changes(vec![first.clone()]).await.unwrap();
    assert_eq!(inserted, 1);

    // Same (fund, day, symbol, kind) under a fresh id is still a duplicate.
    let mut dup = first.clone();
    dup.id = Uuid::new_v4().to_string();
    let inserted = repo
        .save_changes(vec![dup, change("FUND1", "BBB", dec!(-1), Significance::Medium, 2)])
        .await
        .unwrap();
    assert_eq!(inserted, 1);

    let stored = repo.get_changes_since("FUND1", day(1)).unwrap();
    assert_eq!(stored.len(), 2);
    let aaa = stored.iter().find(|c| c.stock_symbol == "AAA").unwrap();
    assert_eq!(aaa.change_type, ChangeType::Increase);
    assert_eq!(aaa.change_amount, dec!(3));
}

#[tokio::test]
async fn test_change_queries_filter_and_order() {
    let (_dir, pool, writer) = setup().await;
    let repo = ChangeRepository::new(pool, writer);
    repo.save_changes(vec![
        change("FUND1", "OLD", dec!(4), Significance::High, 1),
        change("FUND1", "SMALL", dec!(0.3), Significance::Low, 3),
        change("FUND1", "BIG", dec!(-2.5), Significance::High, 3),
        change("FUND1", "MID", dec!(1), Significance::Medium, 3),
        change("FUND2", "OTHER", dec!(3), Significance::High, 3),
    ])
    .await
    .unwrap();

    let since = repo.get_changes_since("FUND1", day(2)).unwrap();
    let symbols: Vec<&str> = since.iter().map(|c| c.stock_symbol.as_str()).collect();
    assert_eq!(symbols, vec!["BIG", "MID", "SMALL"]);

    let significant = repo.get_significant_changes_since(day(1)).unwrap();
    assert_eq!(significant.len(), 4);
    assert!(significant.iter().all(|c| c.significance != Significance::Low));
    // Newest day first, then magnitude.
    assert_eq!(significant[0].stock_symbol, "OTHER");
    assert_eq!(significant[1].stock_symbol, "BIG");
    assert_eq!(significant[3].stock_symbol, "OLD");
}
