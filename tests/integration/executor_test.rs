//! Query execution integration tests.
//!
//! Drives the executor end to end: resolve, open, fetch, normalize, close.

use super::common::TestDb;
use hivedash::db::{ColumnType, Value};
use hivedash::query::{QueryExecutor, QueryFailure, QueryOutcome};

#[tokio::test]
async fn test_unresolved_executor_skips_queries() {
    let executor = QueryExecutor::new(None);
    assert!(!executor.is_connected());

    let outcome = executor.execute("SELECT 1", &[]).await;
    assert!(matches!(
        &outcome,
        QueryOutcome::Failed(QueryFailure::NoConnection)
    ));

    // Collapsing the failure yields a table with no columns and no rows
    let table = outcome.into_table();
    assert!(table.columns.is_empty());
    assert!(table.rows.is_empty());
}

#[tokio::test]
async fn test_empty_result_keeps_schema() {
    let test_db = TestDb::new().await;
    let executor = test_db.executor().await;

    let outcome = executor
        .execute(
            "SELECT name, balance FROM accounts WHERE balance > 1000",
            &[],
        )
        .await;

    let QueryOutcome::Empty(table) = outcome else {
        panic!("expected an empty outcome");
    };
    assert_eq!(table.columns.len(), 2);
    assert_eq!(table.columns[0].name, "name");
    assert_eq!(table.columns[1].name, "balance");
    assert!(table.rows.is_empty());
}

#[tokio::test]
async fn test_rows_are_normalized() {
    let test_db = TestDb::new().await;
    test_db.execute("CREATE TABLE samples (v INTEGER)").await;
    test_db
        .execute("INSERT INTO samples VALUES (1), (2), (NULL), (4)")
        .await;

    let executor = test_db.executor().await;
    let outcome = executor.execute("SELECT v FROM samples", &[]).await;
    assert!(outcome.has_rows());

    let QueryOutcome::Rows(table) = outcome else {
        panic!("expected rows");
    };
    assert_eq!(table.columns[0].semantic, Some(ColumnType::Integer));
    assert_eq!(table.rows.len(), 4);
    assert_eq!(table.rows[0][0], Value::Int(1));
    assert!(table.rows[2][0].is_null());
    assert_eq!(table.rows[3][0], Value::Int(4));
}

#[tokio::test]
async fn test_execution_time_recorded() {
    let test_db = TestDb::new().await;
    test_db
        .seed_accounts(&[("alice", 1500.0, 1000.0)])
        .await;

    let executor = test_db.executor().await;
    let outcome = executor
        .execute("SELECT name, balance FROM accounts", &[])
        .await;

    let QueryOutcome::Rows(table) = outcome else {
        panic!("expected rows");
    };
    assert!(
        !table.execution_time.is_zero(),
        "Expected non-zero execution time"
    );
}

#[tokio::test]
async fn test_bad_sql_reports_failure() {
    let test_db = TestDb::new().await;
    let executor = test_db.executor().await;

    let outcome = executor.execute("SELEC * FROM accounts", &[]).await;

    let QueryOutcome::Failed(QueryFailure::Execution(message)) = outcome else {
        panic!("expected an execution failure");
    };
    assert!(
        message.to_lowercase().contains("syntax") || message.to_lowercase().contains("error"),
        "Expected a syntax error, got: {message}"
    );
}
