//! Database access layer for hivedash.
//!
//! Provides a trait-based interface over single connections, a driver
//! candidate resolver, and the type normalizer applied to fetched tables.
//! Connections are opened per query and closed deterministically; nothing
//! here pools or reuses them.

mod normalize;
mod postgres;
mod resolver;
mod sqlite;
mod types;

pub use normalize::normalize_table;
pub use resolver::{resolve_connection, DriverCandidate, ResolvedConnection};
pub use types::{ColumnInfo, ColumnType, DataTable, Row, Value};

use crate::error::{HivedashError, Result};
use async_trait::async_trait;
use postgres::PostgresConnection;
use sqlite::SqliteDbConnection;

/// Supported database backends, selected by URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatabaseBackend {
    /// Postgres-based HiveSQL mirror (the production setup).
    #[default]
    Postgres,
    /// SQLite file or in-memory database (local snapshots, tests).
    Sqlite,
}

impl DatabaseBackend {
    /// Returns the backend as a string for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite",
        }
    }

    /// Determines the backend from a connection URL scheme.
    pub fn from_url(url: &str) -> Option<Self> {
        let scheme = url.split(':').next()?;
        match scheme.to_lowercase().as_str() {
            "postgres" | "postgresql" => Some(Self::Postgres),
            "sqlite" => Some(Self::Sqlite),
            _ => None,
        }
    }
}

/// Opens a single connection to the database behind the given URL.
///
/// This is the central factory for connections. Every call opens a fresh
/// connection; the caller owns it and is responsible for closing it.
pub async fn open(url: &str) -> Result<Box<dyn SqlConnection>> {
    match DatabaseBackend::from_url(url) {
        Some(DatabaseBackend::Postgres) => {
            let conn = PostgresConnection::open(url).await?;
            Ok(Box::new(conn))
        }
        Some(DatabaseBackend::Sqlite) => {
            let conn = SqliteDbConnection::open(url).await?;
            Ok(Box::new(conn))
        }
        None => Err(HivedashError::connection(format!(
            "unsupported connection URL scheme: {url}"
        ))),
    }
}

/// Trait defining the interface for a single database connection.
///
/// All operations are async and return Results with HivedashError.
#[async_trait]
pub trait SqlConnection: Send + std::fmt::Debug {
    /// Executes a SQL query with positional parameters and fetches the
    /// complete result set, including column metadata when zero rows match.
    async fn fetch_all(&mut self, sql: &str, params: &[Value]) -> Result<DataTable>;

    /// Closes the connection. Consumes it so a closed connection cannot be
    /// reused.
    async fn close(self: Box<Self>) -> Result<()>;
}
