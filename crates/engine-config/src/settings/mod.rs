use crate::{secrets::SecretProvider, settings::error::SettingsError};
use model::{
    core::identifiers::TableRef,
    execution::connection::{ConnectionConfig, DatabaseDialect},
};
use tracing::debug;

pub mod error;

pub const SERVER_NAME: &str = "server-name";
pub const DATABASE_NAME: &str = "database-name";
pub const USERNAME: &str = "username";
pub const PASSWORD: &str = "password";
pub const DRIVER: &str = "driver";
pub const SCHEMA_NAME: &str = "schema-name";
pub const TABLE_NAME: &str = "table-name";

/// Optional: `postgres` (default) or `mysql`.
pub const DIALECT: &str = "dialect";
/// Optional: defaults to the dialect's standard port.
pub const PORT: &str = "port";

pub const REQUIRED_SECRETS: [&str; 7] = [
    SERVER_NAME,
    DATABASE_NAME,
    USERNAME,
    PASSWORD,
    DRIVER,
    SCHEMA_NAME,
    TABLE_NAME,
];

/// Everything a flow run needs, resolved once before any I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowSettings {
    pub connection: ConnectionConfig,
    pub table: TableRef,
}

impl FlowSettings {
    pub fn resolve(secrets: &dyn SecretProvider) -> Result<Self, SettingsError> {
        let missing = REQUIRED_SECRETS
            .iter()
            .filter(|name| lookup(secrets, name).is_none())
            .map(|name| name.to_string())
            .collect::<Vec<_>>();
        if !missing.is_empty() {
            return Err(SettingsError::MissingSecrets(missing));
        }

        let required = |name: &str| {
            lookup(secrets, name).ok_or_else(|| SettingsError::MissingSecrets(vec![name.to_string()]))
        };

        let dialect = match lookup(secrets, DIALECT) {
            Some(value) => value
                .parse::<DatabaseDialect>()
                .map_err(|reason| invalid(DIALECT, reason))?,
            None => DatabaseDialect::Postgres,
        };

        let port = match lookup(secrets, PORT) {
            Some(value) => parse_port(&value)?,
            None => dialect.default_port(),
        };

        let table = TableRef::new(required(SCHEMA_NAME)?, required(TABLE_NAME)?)
            .map_err(|e| {
                let name = if e.kind() == "Schema" { SCHEMA_NAME } else { TABLE_NAME };
                invalid(name, e.to_string())
            })?;

        let connection = ConnectionConfig {
            dialect,
            server: required(SERVER_NAME)?,
            port,
            database: required(DATABASE_NAME)?,
            username: required(USERNAME)?,
            password: required(PASSWORD)?,
            driver: required(DRIVER)?,
        };

        debug!(connection = %connection.redacted(), %table, "Resolved flow settings");
        Ok(FlowSettings { connection, table })
    }
}

/// Blank values count as absent, except for the password.
fn lookup(secrets: &dyn SecretProvider, name: &str) -> Option<String> {
    let value = secrets.secret(name)?;
    if name == PASSWORD {
        return Some(value);
    }
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_port(value: &str) -> Result<u16, SettingsError> {
    match value.parse::<u16>() {
        Ok(0) => Err(invalid(PORT, "port must be between 1 and 65535".to_string())),
        Ok(port) => Ok(port),
        Err(e) => Err(invalid(PORT, format!("'{value}' is not a port number ({e})"))),
    }
}

fn invalid(name: &str, reason: String) -> SettingsError {
    SettingsError::InvalidValue {
        name: name.to_string(),
        reason,
    }
}
