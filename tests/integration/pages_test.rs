//! Dashboard page integration tests.
//!
//! Runs each page's fixed query against a seeded mirror database and
//! checks the chart built from the result.

use super::common::TestDb;
use hivedash::db::ColumnType;
use hivedash::pages::PageId;
use hivedash::query::QueryOutcome;

#[tokio::test]
async fn test_top_accounts_page_charts_top_100() {
    let test_db = TestDb::new().await;

    // 150 qualifying accounts plus two that the balance filter excludes
    let mut accounts: Vec<(String, f64, f64)> = (0..150)
        .map(|i| (format!("account{i:03}"), 1001.0 + i as f64, 0.0))
        .collect();
    accounts.push(("dust".to_string(), 500.0, 0.0));
    accounts.push(("edge".to_string(), 1000.0, 0.0));

    let refs: Vec<(&str, f64, f64)> = accounts
        .iter()
        .map(|(name, balance, vests)| (name.as_str(), *balance, *vests))
        .collect();
    test_db.seed_accounts(&refs).await;

    let executor = test_db.executor().await;
    let page = PageId::TopAccounts;
    let outcome = executor.execute(page.spec().query, &[]).await;

    let QueryOutcome::Rows(table) = outcome else {
        panic!("expected rows");
    };
    assert_eq!(table.rows.len(), 100);
    assert_eq!(table.columns[0].semantic, Some(ColumnType::Text));
    assert_eq!(table.columns[1].semantic, Some(ColumnType::Float));

    // Every fetched balance respects the query's filter
    let balances = table.column_values("balance").unwrap();
    assert!(balances
        .iter()
        .all(|v| v.as_f64().is_some_and(|b| b > 1000.0)));

    let chart = page.build_chart(&table, None).unwrap();
    assert_eq!(chart.bars.len(), 100);
    assert_eq!(chart.bars[0].label, "account149");
    assert_eq!(chart.bars[0].value, 1150.0);
    assert_eq!(chart.bars[99].label, "account050");
    assert_eq!(chart.bars[99].value, 1051.0);

    // Chart preserves the database's descending order
    for pair in chart.bars.windows(2) {
        assert!(pair[0].value >= pair[1].value);
    }
}

#[tokio::test]
async fn test_community_power_page_converts_vests_to_hp() {
    let test_db = TestDb::new().await;

    test_db
        .seed_accounts(&[
            ("alice", 0.0, 2_500_000.0),
            ("bob", 0.0, 1_500_000.0),
            ("carol", 0.0, 3_000_000.0),
            ("dave", 0.0, 500_000.0),
        ])
        .await;
    test_db
        .seed_communities(&[
            ("hive-111", "Music"),
            ("hive-222", "Photography"),
            ("hive-333", "Gaming"),
        ])
        .await;
    test_db
        .seed_subscribers(&[
            ("hive-111", "alice"),
            ("hive-111", "bob"),
            ("hive-222", "carol"),
            ("hive-333", "dave"),
        ])
        .await;

    // Accounts without vesting data do not contribute to the sum
    test_db
        .execute("INSERT INTO accounts (name, balance, vesting_shares) VALUES ('ghost', 0, NULL)")
        .await;
    test_db
        .execute("INSERT INTO subscribers (community, account) VALUES ('hive-111', 'ghost')")
        .await;

    let executor = test_db.executor().await;
    let page = PageId::CommunityPower;
    let outcome = executor.execute(page.spec().query, &[]).await;

    let QueryOutcome::Rows(table) = outcome else {
        panic!("expected rows");
    };
    // One joined row per subscription
    assert_eq!(table.rows.len(), 5);

    // With 600 HIVE per MVEST: HP = vests * 600 / 1_000_000
    let chart = page.build_chart(&table, Some(600.0)).unwrap();
    assert_eq!(chart.bars.len(), 3);

    assert_eq!(chart.bars[0].label, "Music");
    assert!((chart.bars[0].value - 2400.0).abs() < 1e-9);
    assert_eq!(chart.bars[1].label, "Photography");
    assert!((chart.bars[1].value - 1800.0).abs() < 1e-9);
    assert_eq!(chart.bars[2].label, "Gaming");
    assert!((chart.bars[2].value - 300.0).abs() < 1e-9);
}
