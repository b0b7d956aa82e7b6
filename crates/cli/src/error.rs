use engine_config::error::SecretError;
use engine_runtime::error::FlowError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to load secrets: {0}")]
    Secrets(#[from] SecretError),

    #[error("{0}")]
    Flow(#[from] FlowError),

    #[error("Failed to write the report: {0}")]
    ReportWrite(#[from] std::io::Error),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Shutdown requested")]
    ShutdownRequested,
}
