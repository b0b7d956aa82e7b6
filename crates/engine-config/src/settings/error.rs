use thiserror::Error;

/// Errors raised when resolving secrets into flow settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// One or more required secrets are absent or blank.
    #[error("Missing required secrets: {}", .0.join(", "))]
    MissingSecrets(Vec<String>),

    /// A secret is present but unusable.
    #[error("Invalid value for secret '{name}': {reason}")]
    InvalidValue { name: String, reason: String },
}
