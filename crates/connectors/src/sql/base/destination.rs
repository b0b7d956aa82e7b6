use crate::sql::base::error::{ConnectorError, DbError};
use async_trait::async_trait;
use model::{
    core::identifiers::TableRef,
    execution::connection::ConnectionConfig,
    records::row::RowSet,
};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseKind {
    MySql,
    Postgres,
    Other(String),
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseKind::MySql => f.write_str("MySQL"),
            DatabaseKind::Postgres => f.write_str("PostgreSQL"),
            DatabaseKind::Other(name) => f.write_str(name),
        }
    }
}

/// Step of the replace transaction that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePhase {
    Begin,
    Clear,
    /// `index` is the zero-based position of the row in the input.
    Insert { index: usize, id: i32 },
    Commit,
}

impl fmt::Display for WritePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WritePhase::Begin => f.write_str("BEGIN"),
            WritePhase::Clear => f.write_str("DELETE"),
            WritePhase::Insert { index, id } => write!(f, "INSERT of row {index} (ID {id})"),
            WritePhase::Commit => f.write_str("COMMIT"),
        }
    }
}

/// A failed replace. The transaction has been rolled back, so the table
/// holds exactly what it held before the call.
#[derive(Debug, Error)]
#[error("{phase} failed: {source}")]
pub struct ReplaceError {
    pub phase: WritePhase,
    #[source]
    pub source: DbError,
}

impl ReplaceError {
    pub fn new(phase: WritePhase, source: impl Into<DbError>) -> Self {
        Self {
            phase,
            source: source.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaceSummary {
    pub rows_deleted: u64,
    pub rows_inserted: u64,
}

/// A database table that can be fully replaced by a set of `(ID, Name)` rows.
#[async_trait]
pub trait TableDestination: Send + Sync {
    fn kind(&self) -> DatabaseKind;

    /// Creates `(ID INTEGER, Name VARCHAR(255))` unless the table already exists.
    async fn ensure_table(&self, table: &TableRef) -> Result<(), DbError>;

    /// Deletes every existing row and inserts `rows` in input order, in a
    /// single transaction.
    async fn replace_rows(
        &self,
        table: &TableRef,
        rows: &RowSet,
    ) -> Result<ReplaceSummary, ReplaceError>;

    async fn read_rows(&self, table: &TableRef) -> Result<RowSet, DbError>;

    /// Releases the underlying connection. Later calls fail.
    async fn close(&self) -> Result<(), DbError>;
}

/// Opens destinations from connection settings.
#[async_trait]
pub trait DestinationFactory: Send + Sync {
    async fn open(
        &self,
        config: &ConnectionConfig,
    ) -> Result<Box<dyn TableDestination>, ConnectorError>;
}
