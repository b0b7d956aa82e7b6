use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Database engines a load can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatabaseDialect {
    Postgres,
    MySql,
}

impl DatabaseDialect {
    pub fn default_port(&self) -> u16 {
        match self {
            DatabaseDialect::Postgres => 5432,
            DatabaseDialect::MySql => 3306,
        }
    }

    /// Dialect part of the connection string, e.g. `postgresql`.
    pub fn scheme(&self) -> &'static str {
        match self {
            DatabaseDialect::Postgres => "postgresql",
            DatabaseDialect::MySql => "mysql",
        }
    }

    /// Native client library used to talk to the engine.
    pub fn client(&self) -> &'static str {
        match self {
            DatabaseDialect::Postgres => "tokio_postgres",
            DatabaseDialect::MySql => "mysql_async",
        }
    }
}

impl FromStr for DatabaseDialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pg" | "postgres" | "postgresql" => Ok(DatabaseDialect::Postgres),
            "mysql" | "mariadb" => Ok(DatabaseDialect::MySql),
            other => Err(format!("Unknown database dialect: {other}")),
        }
    }
}

impl fmt::Display for DatabaseDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scheme())
    }
}

/// Everything needed to open one database connection for a run.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub dialect: DatabaseDialect,
    pub server: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    /// Driver name appended as the `driver` query parameter.
    pub driver: String,
}

impl ConnectionConfig {
    /// `<dialect>+<client>://<user>:<password>@<host>:<port>/<database>?driver=<driver>`
    pub fn connection_string(&self) -> String {
        self.render(&self.password)
    }

    /// Same as [`Self::connection_string`] with the password masked; safe to log.
    pub fn redacted(&self) -> String {
        self.render("***")
    }

    fn render(&self, password: &str) -> String {
        format!(
            "{}+{}://{}:{}@{}:{}/{}?driver={}",
            self.dialect.scheme(),
            self.dialect.client(),
            self.username,
            password,
            self.server,
            self.port,
            self.database,
            self.driver
        )
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("dialect", &self.dialect)
            .field("server", &self.server)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"***")
            .field("driver", &self.driver)
            .finish()
    }
}
