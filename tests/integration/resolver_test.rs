//! Driver resolution integration tests.
//!
//! Probes real SQLite URLs, good and bad, through the public resolver.

use super::common::TestDb;
use hivedash::db::{resolve_connection, DriverCandidate};

/// A syntactically valid URL pointing at a file that does not exist.
/// Opening fails because files are not created unless the URL asks for it.
fn missing_db_candidate(name: &str) -> DriverCandidate {
    let dir = std::env::temp_dir().join("hivedash-missing");
    DriverCandidate::new(name, format!("sqlite://{}/{}.db", dir.display(), name))
}

#[tokio::test]
async fn test_resolves_first_working_candidate() {
    let test_db = TestDb::new().await;
    let other_db = TestDb::new().await;

    let candidates = [
        DriverCandidate::new("first", test_db.url()),
        DriverCandidate::new("second", other_db.url()),
    ];

    let resolved = resolve_connection(&candidates).await.unwrap();
    assert_eq!(resolved.driver, "first");
    assert_eq!(resolved.url, test_db.url());
}

#[tokio::test]
async fn test_skips_failing_candidates_in_order() {
    let test_db = TestDb::new().await;

    let candidates = [
        missing_db_candidate("broken-a"),
        missing_db_candidate("broken-b"),
        DriverCandidate::new("working", test_db.url()),
    ];

    let resolved = resolve_connection(&candidates).await.unwrap();
    assert_eq!(resolved.driver, "working");
}

#[tokio::test]
async fn test_returns_none_when_every_candidate_fails() {
    let candidates = [
        missing_db_candidate("broken-a"),
        missing_db_candidate("broken-b"),
    ];

    assert!(resolve_connection(&candidates).await.is_none());
}
