//! Shared helpers for integration tests.

use hivedash::db::{self, DriverCandidate, Value};
use hivedash::query::QueryExecutor;
use tempfile::TempDir;

/// A throwaway on-disk SQLite database seeded with the mirror schema.
pub struct TestDb {
    /// Keeps the backing file alive for the test's duration.
    _dir: TempDir,
    url: String,
}

impl TestDb {
    /// Creates the database file and the mirror tables.
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("mirror.db");
        let url = format!("sqlite://{}?mode=rwc", path.display());

        let test_db = Self { _dir: dir, url };
        test_db
            .execute(
                "CREATE TABLE accounts (name TEXT PRIMARY KEY, balance REAL, vesting_shares REAL)",
            )
            .await;
        test_db
            .execute("CREATE TABLE communities (name TEXT PRIMARY KEY, title TEXT)")
            .await;
        test_db
            .execute("CREATE TABLE subscribers (community TEXT, account TEXT)")
            .await;
        test_db
    }

    /// Connection URL of the database file.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Runs a single statement, discarding any result.
    pub async fn execute(&self, sql: &str) {
        let mut conn = db::open(&self.url).await.expect("open test database");
        conn.fetch_all(sql, &[]).await.expect("execute statement");
        conn.close().await.expect("close test database");
    }

    /// Inserts accounts as `(name, balance, vesting_shares)` rows.
    pub async fn seed_accounts(&self, accounts: &[(&str, f64, f64)]) {
        let mut conn = db::open(&self.url).await.expect("open test database");
        for (name, balance, vesting_shares) in accounts {
            conn.fetch_all(
                "INSERT INTO accounts (name, balance, vesting_shares) VALUES (?, ?, ?)",
                &[
                    Value::from(*name),
                    Value::Float(*balance),
                    Value::Float(*vesting_shares),
                ],
            )
            .await
            .expect("insert account");
        }
        conn.close().await.expect("close test database");
    }

    /// Inserts communities as `(name, title)` rows.
    pub async fn seed_communities(&self, communities: &[(&str, &str)]) {
        let mut conn = db::open(&self.url).await.expect("open test database");
        for (name, title) in communities {
            conn.fetch_all(
                "INSERT INTO communities (name, title) VALUES (?, ?)",
                &[Value::from(*name), Value::from(*title)],
            )
            .await
            .expect("insert community");
        }
        conn.close().await.expect("close test database");
    }

    /// Inserts subscriptions as `(community, account)` rows.
    pub async fn seed_subscribers(&self, subscribers: &[(&str, &str)]) {
        let mut conn = db::open(&self.url).await.expect("open test database");
        for (community, account) in subscribers {
            conn.fetch_all(
                "INSERT INTO subscribers (community, account) VALUES (?, ?)",
                &[Value::from(*community), Value::from(*account)],
            )
            .await
            .expect("insert subscriber");
        }
        conn.close().await.expect("close test database");
    }

    /// Builds a query executor resolved against this database.
    pub async fn executor(&self) -> QueryExecutor {
        let candidates = [DriverCandidate::new("sqlite", self.url.clone())];
        let resolved = db::resolve_connection(&candidates).await;
        assert!(resolved.is_some(), "test database should resolve");
        QueryExecutor::new(resolved)
    }
}
