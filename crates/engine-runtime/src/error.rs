use connectors::{
    file::csv::error::FileError,
    sql::base::error::{ConnectorError, DbError},
};
use engine_config::settings::error::SettingsError;
use thiserror::Error;

/// Errors that abort a flow before the database is touched.
#[derive(Debug, Error)]
pub enum FlowError {
    /// A required secret is missing or unusable.
    #[error("Configuration error: {0}")]
    Settings(#[from] SettingsError),

    /// The CSV file is missing or cannot be parsed.
    #[error("Source read error: {0}")]
    Source(#[from] FileError),
}

/// Why the database stage of a load failed.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Could not connect to the database: {0}")]
    Connection(#[from] ConnectorError),

    #[error("Could not create the destination table: {0}")]
    Schema(#[source] DbError),

    /// The transaction could not be started on an opened destination.
    #[error("Lost the database connection before clearing the table: {0}")]
    ConnectionLost(#[source] DbError),

    #[error("Could not clear the destination table: {0}")]
    Clear(#[source] DbError),

    /// Nothing was committed; the table still holds its previous rows.
    #[error("Row {index} (ID {id}) could not be inserted: {source}")]
    PartialWrite {
        index: usize,
        id: i32,
        #[source]
        source: DbError,
    },

    #[error("Could not commit the load: {0}")]
    Commit(#[source] DbError),

    #[error("Could not read back the destination table: {0}")]
    Verify(#[source] DbError),
}

impl LoadError {
    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::Connection(_) | LoadError::ConnectionLost(_) => "connection",
            LoadError::Schema(_) => "schema",
            LoadError::Clear(_) => "clear",
            LoadError::PartialWrite { .. } => "partial_write",
            LoadError::Commit(_) => "commit",
            LoadError::Verify(_) => "verify",
        }
    }
}
