//! Query execution with explicit outcomes.
//!
//! Each execution opens a fresh connection from the resolved URL, fetches
//! the complete result set, and closes the connection before returning.
//! Outcomes distinguish rows, an empty result, and failure; callers decide
//! how much of that distinction to surface.

use std::fmt;
use std::time::Instant;

use crate::db::{self, normalize_table, DataTable, ResolvedConnection};
use crate::error::HivedashError;
use tracing::{error, info, warn};

/// Executes page queries against the resolved mirror connection.
///
/// Holds no open connection: every call opens one, uses it, and closes it.
/// A missing resolution is permanent for the process lifetime; execution
/// then fails immediately without touching the network.
#[derive(Debug, Clone)]
pub struct QueryExecutor {
    resolved: Option<ResolvedConnection>,
}

impl QueryExecutor {
    /// Creates an executor from the resolver's result.
    pub fn new(resolved: Option<ResolvedConnection>) -> Self {
        Self { resolved }
    }

    /// Returns true if a working connection URL was resolved at startup.
    pub fn is_connected(&self) -> bool {
        self.resolved.is_some()
    }

    /// Runs a query and fetches the complete result set.
    ///
    /// On success with rows the table is type-normalized. On an empty result
    /// the table still carries column metadata. Failures are logged here and
    /// reported in the outcome rather than raised.
    pub async fn execute(&self, sql: &str, params: &[db::Value]) -> QueryOutcome {
        let Some(resolved) = &self.resolved else {
            warn!("No valid database connection; skipping query");
            return QueryOutcome::Failed(QueryFailure::NoConnection);
        };

        let start = Instant::now();

        let mut conn = match db::open(&resolved.url).await {
            Ok(conn) => conn,
            Err(e) => {
                error!("Database error: {e}");
                return QueryOutcome::Failed(QueryFailure::Execution(e.to_string()));
            }
        };

        let fetched = conn.fetch_all(sql, params).await;

        // Close deterministically whether the fetch worked or not.
        if let Err(e) = conn.close().await {
            warn!("{e}");
        }

        match fetched {
            Ok(mut table) => {
                table.execution_time = start.elapsed();
                if table.is_empty() {
                    QueryOutcome::Empty(table)
                } else {
                    normalize_table(&mut table);
                    info!(
                        "Query returned {} rows in {:?}",
                        table.row_count(),
                        table.execution_time
                    );
                    QueryOutcome::Rows(table)
                }
            }
            Err(e) => {
                error!("Database error: {e}");
                QueryOutcome::Failed(QueryFailure::Execution(e.to_string()))
            }
        }
    }
}

/// Result of executing a query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// Query succeeded and returned at least one row.
    Rows(DataTable),

    /// Query succeeded but matched nothing. Column metadata is preserved.
    Empty(DataTable),

    /// Query could not be executed. The reason is in the payload; callers
    /// that only care about "no data" can use [`QueryOutcome::into_table`].
    Failed(QueryFailure),
}

impl QueryOutcome {
    /// Returns true if the query produced at least one row.
    pub fn has_rows(&self) -> bool {
        matches!(self, QueryOutcome::Rows(_))
    }

    /// Collapses the outcome into a table, mirroring callers that treat
    /// every non-row outcome as an empty result. Failures become an empty
    /// table with no columns.
    pub fn into_table(self) -> DataTable {
        match self {
            QueryOutcome::Rows(table) | QueryOutcome::Empty(table) => table,
            QueryOutcome::Failed(_) => DataTable::new(),
        }
    }
}

/// Why a query could not be executed.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryFailure {
    /// No candidate connected at startup; nothing was attempted.
    NoConnection,

    /// Opening the connection or running the query failed.
    Execution(String),
}

impl fmt::Display for QueryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryFailure::NoConnection => write!(f, "no valid database connection"),
            QueryFailure::Execution(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<HivedashError> for QueryFailure {
    fn from(e: HivedashError) -> Self {
        QueryFailure::Execution(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{ColumnInfo, Value};

    #[tokio::test]
    async fn test_execute_without_connection_fails_immediately() {
        let executor = QueryExecutor::new(None);
        assert!(!executor.is_connected());

        let outcome = executor.execute("SELECT 1", &[]).await;
        assert_eq!(outcome, QueryOutcome::Failed(QueryFailure::NoConnection));
    }

    #[tokio::test]
    async fn test_failed_outcome_collapses_to_empty_table() {
        let executor = QueryExecutor::new(None);
        let table = executor.execute("SELECT 1", &[]).await.into_table();

        assert!(table.is_empty());
        assert!(table.columns.is_empty());
    }

    #[test]
    fn test_into_table_preserves_schema_of_empty_result() {
        let table = DataTable::with_data(
            vec![ColumnInfo::new("name", "TEXT"), ColumnInfo::new("balance", "REAL")],
            Vec::new(),
        );
        let collapsed = QueryOutcome::Empty(table).into_table();

        assert!(collapsed.is_empty());
        assert_eq!(collapsed.columns.len(), 2);
    }

    #[test]
    fn test_has_rows() {
        let table = DataTable::with_data(
            vec![ColumnInfo::new("n", "INTEGER")],
            vec![vec![Value::Int(1)]],
        );
        assert!(QueryOutcome::Rows(table).has_rows());
        assert!(!QueryOutcome::Empty(DataTable::new()).has_rows());
        assert!(!QueryOutcome::Failed(QueryFailure::NoConnection).has_rows());
    }

    #[test]
    fn test_failure_display() {
        assert_eq!(
            QueryFailure::NoConnection.to_string(),
            "no valid database connection"
        );
        assert_eq!(
            QueryFailure::Execution("boom".to_string()).to_string(),
            "boom"
        );
    }
}
