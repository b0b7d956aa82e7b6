use thiserror::Error;

/// Errors raised while loading a secret source.
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("Failed to read env file {path}: {source}")]
    EnvFileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid env file: {0}")]
    EnvFileFormat(String),
}
