use crate::sql::{
    base::{
        destination::{DestinationFactory, TableDestination},
        error::ConnectorError,
    },
    mysql::adapter::MySqlAdapter,
    postgres::adapter::PgAdapter,
};
use async_trait::async_trait;
use model::execution::connection::{ConnectionConfig, DatabaseDialect};
use tracing::info;

#[derive(Clone)]
pub enum Adapter {
    MySql(MySqlAdapter),
    Postgres(PgAdapter),
}

impl Adapter {
    pub async fn sql(config: &ConnectionConfig) -> Result<Self, ConnectorError> {
        match config.dialect {
            DatabaseDialect::MySql => {
                let adapter = MySqlAdapter::connect(config).await?;
                Ok(Adapter::MySql(adapter))
            }
            DatabaseDialect::Postgres => {
                let adapter = PgAdapter::connect(config).await?;
                Ok(Adapter::Postgres(adapter))
            }
        }
    }

    pub fn into_destination(self) -> Box<dyn TableDestination> {
        match self {
            Adapter::MySql(adapter) => Box::new(adapter),
            Adapter::Postgres(adapter) => Box::new(adapter),
        }
    }
}

/// Opens real database connections, picking the adapter from the dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlDestinationFactory;

#[async_trait]
impl DestinationFactory for SqlDestinationFactory {
    async fn open(
        &self,
        config: &ConnectionConfig,
    ) -> Result<Box<dyn TableDestination>, ConnectorError> {
        info!("Connecting to {}", config.redacted());
        let adapter = Adapter::sql(config).await?;
        Ok(adapter.into_destination())
    }
}
