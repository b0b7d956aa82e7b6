use crate::sql::{
    base::{
        destination::{DatabaseKind, ReplaceError, ReplaceSummary, TableDestination, WritePhase},
        error::{ConnectorError, DbError},
        query::generator::QueryGenerator,
    },
    postgres::{
        params::PgParams,
        utils::{connect_client, pg_config},
    },
};
use async_trait::async_trait;
use model::{
    core::identifiers::TableRef,
    execution::connection::ConnectionConfig,
    records::row::{Row, RowSet},
};
use planner::query::dialect;
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockWriteGuard};
use tokio_postgres::{Client, Transaction};
use tracing::{debug, warn};

#[derive(Clone)]
pub struct PgAdapter {
    client: Arc<RwLock<Option<Client>>>,
    dialect: dialect::Postgres,
}

impl PgAdapter {
    pub async fn connect(config: &ConnectionConfig) -> Result<Self, ConnectorError> {
        let client = connect_client(pg_config(config)).await?;
        Ok(PgAdapter {
            client: Arc::new(RwLock::new(Some(client))),
            dialect: dialect::Postgres,
        })
    }

    pub async fn lock_client(&self) -> RwLockWriteGuard<'_, Option<Client>> {
        self.client.write().await
    }

    /// Runs the DELETE and every INSERT inside `tx`; returns the deleted row count.
    async fn write_rows(
        &self,
        tx: &Transaction<'_>,
        table: &TableRef,
        rows: &RowSet,
    ) -> Result<u64, ReplaceError> {
        let generator = QueryGenerator::new(&self.dialect);

        let delete = generator.delete_all(table);
        debug!("DELETE statement: {}", delete);
        let deleted = tx
            .execute(delete.as_str(), &[])
            .await
            .map_err(|e| ReplaceError::new(WritePhase::Clear, e))?;

        for (index, row) in rows.iter().enumerate() {
            let (sql, params) = generator.insert_row(table, row);
            let bindings = PgParams::from_values(params);
            tx.execute(sql.as_str(), &bindings.as_refs())
                .await
                .map_err(|e| ReplaceError::new(WritePhase::Insert { index, id: row.id }, e))?;
        }

        Ok(deleted)
    }
}

#[async_trait]
impl TableDestination for PgAdapter {
    fn kind(&self) -> DatabaseKind {
        DatabaseKind::Postgres
    }

    async fn ensure_table(&self, table: &TableRef) -> Result<(), DbError> {
        let generator = QueryGenerator::new(&self.dialect);
        let sql = generator.create_table(table);
        debug!("CREATE statement: {}", sql);

        let guard = self.client.read().await;
        let client = guard.as_ref().ok_or(DbError::ConnectionClosed)?;
        client.batch_execute(&sql).await?;
        Ok(())
    }

    async fn replace_rows(
        &self,
        table: &TableRef,
        rows: &RowSet,
    ) -> Result<ReplaceSummary, ReplaceError> {
        let mut guard = self.lock_client().await;
        let client = guard
            .as_mut()
            .ok_or_else(|| ReplaceError::new(WritePhase::Begin, DbError::ConnectionClosed))?;
        let tx = client
            .transaction()
            .await
            .map_err(|e| ReplaceError::new(WritePhase::Begin, e))?;

        match self.write_rows(&tx, table, rows).await {
            Ok(rows_deleted) => {
                tx.commit()
                    .await
                    .map_err(|e| ReplaceError::new(WritePhase::Commit, e))?;
                Ok(ReplaceSummary {
                    rows_deleted,
                    rows_inserted: rows.len() as u64,
                })
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(%rollback_err, "Postgres rollback failed");
                }
                Err(err)
            }
        }
    }

    async fn read_rows(&self, table: &TableRef) -> Result<RowSet, DbError> {
        let generator = QueryGenerator::new(&self.dialect);
        let sql = generator.select_all(table);

        let guard = self.client.read().await;
        let client = guard.as_ref().ok_or(DbError::ConnectionClosed)?;
        let rows = client.query(sql.as_str(), &[]).await?;

        rows.iter()
            .map(|row| {
                Ok(Row {
                    id: row.try_get(0)?,
                    name: row.try_get(1)?,
                })
            })
            .collect::<Result<RowSet, DbError>>()
    }

    async fn close(&self) -> Result<(), DbError> {
        // Dropping the client ends the spawned connection task.
        if self.lock_client().await.take().is_some() {
            debug!("Postgres connection closed");
        }
        Ok(())
    }
}
