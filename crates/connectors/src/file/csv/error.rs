use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    #[error("Required column '{0}' is missing from the CSV header")]
    MissingColumn(String),
    #[error("Invalid row at line {line}: {reason}")]
    InvalidRow { line: u64, reason: String },
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),
}
