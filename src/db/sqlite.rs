//! SQLite connection implementation.
//!
//! Implements the `SqlConnection` trait over a local SQLite file or
//! in-memory database. Used for local snapshots of the mirror schema and
//! throughout the test suite; decoding follows the declared column types
//! reported by the driver.

use crate::db::{ColumnInfo, DataTable, Row, SqlConnection, Value};
use crate::error::{HivedashError, Result};
use async_trait::async_trait;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteConnection, SqliteRow};
use sqlx::{Column as SqlxColumn, Connection, Executor, Row as SqlxRow, Sqlite, Statement, TypeInfo};
use tracing::debug;

/// A single SQLite connection.
#[derive(Debug)]
pub struct SqliteDbConnection {
    conn: SqliteConnection,
}

impl SqliteDbConnection {
    /// Opens the database at the given URL.
    ///
    /// Missing files are an error unless the URL opts into creation with
    /// `?mode=rwc`.
    pub async fn open(url: &str) -> Result<Self> {
        let conn = SqliteConnection::connect(url)
            .await
            .map_err(|e| HivedashError::connection(format!("Cannot open {url}: {e}")))?;

        debug!("Opened sqlite connection to {url}");
        Ok(Self { conn })
    }
}

#[async_trait]
impl SqlConnection for SqliteDbConnection {
    async fn fetch_all(&mut self, sql: &str, params: &[Value]) -> Result<DataTable> {
        // Prepare first so column metadata is available even when the query
        // matches zero rows.
        let stmt = self
            .conn
            .prepare(sql)
            .await
            .map_err(|e| HivedashError::query(e.to_string()))?;

        let columns: Vec<ColumnInfo> = stmt
            .columns()
            .iter()
            .map(|col| ColumnInfo::new(col.name(), col.type_info().name()))
            .collect();

        let mut query = stmt.query();
        for param in params {
            query = bind_value(query, param);
        }

        let fetched = query
            .fetch_all(&mut self.conn)
            .await
            .map_err(|e| HivedashError::query(e.to_string()))?;

        let rows: Vec<Row> = fetched.iter().map(convert_row).collect();

        Ok(DataTable::with_data(columns, rows))
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.conn
            .close()
            .await
            .map_err(|e| HivedashError::connection(format!("Error closing connection: {e}")))
    }
}

/// Binds a single parameter value onto the query.
fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: &Value,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        Value::Null => query.bind(None::<String>),
        Value::Bool(b) => query.bind(*b),
        Value::Int(i) => query.bind(*i),
        Value::Float(f) => query.bind(*f),
        Value::String(s) => query.bind(s.clone()),
        Value::DateTime(dt) => query.bind(*dt),
        Value::Bytes(b) => query.bind(b.clone()),
    }
}

/// Converts a sqlx SqliteRow to our Row type.
fn convert_row(row: &SqliteRow) -> Row {
    row.columns()
        .iter()
        .enumerate()
        .map(|(i, col)| convert_value(row, i, col.type_info().name()))
        .collect()
}

/// Converts a single column value from a SqliteRow to our Value type.
///
/// SQLite column types are declarations, not guarantees. The declared type
/// picks the decode target; values that do not fit fall back to NULL.
fn convert_value(row: &SqliteRow, index: usize, type_name: &str) -> Value {
    let declared = type_name.to_uppercase();

    if declared.contains("INT") {
        return row
            .try_get::<Option<i64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Int)
            .unwrap_or(Value::Null);
    }

    if declared.contains("REAL") || declared.contains("FLOA") || declared.contains("DOUB") {
        return row
            .try_get::<Option<f64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Float)
            .unwrap_or(Value::Null);
    }

    if declared.contains("BOOL") {
        return row
            .try_get::<Option<bool>, _>(index)
            .ok()
            .flatten()
            .map(Value::Bool)
            .unwrap_or(Value::Null);
    }

    if declared.contains("DATETIME") || declared.contains("TIMESTAMP") || declared.contains("DATE")
    {
        // Stored as ISO text; decode to a timestamp where possible and keep
        // the raw text otherwise so the normalizer can have a go at it.
        if let Ok(Some(dt)) = row.try_get::<Option<chrono::NaiveDateTime>, _>(index) {
            return Value::DateTime(dt);
        }
        return row
            .try_get::<Option<String>, _>(index)
            .ok()
            .flatten()
            .map(Value::String)
            .unwrap_or(Value::Null);
    }

    if declared.contains("BLOB") {
        return row
            .try_get::<Option<Vec<u8>>, _>(index)
            .ok()
            .flatten()
            .map(Value::Bytes)
            .unwrap_or(Value::Null);
    }

    if declared.contains("NUMERIC") || declared.contains("DECIMAL") {
        // Decimal columns may store text when the literal does not round-trip
        // through a float. Prefer the float reading, keep text as-is.
        if let Ok(Some(f)) = row.try_get::<Option<f64>, _>(index) {
            return Value::Float(f);
        }
        return row
            .try_get::<Option<String>, _>(index)
            .ok()
            .flatten()
            .map(Value::String)
            .unwrap_or(Value::Null);
    }

    // TEXT, CHAR, CLOB, and anything undeclared.
    row.try_get::<Option<String>, _>(index)
        .ok()
        .flatten()
        .map(Value::String)
        .unwrap_or(Value::Null)
}
