use crate::sql::{
    base::{
        destination::{DatabaseKind, ReplaceError, ReplaceSummary, TableDestination, WritePhase},
        error::{ConnectorError, DbError},
        query::generator::QueryGenerator,
    },
    mysql::params::MySqlParamStore,
};
use async_trait::async_trait;
use model::{
    core::identifiers::TableRef,
    execution::connection::ConnectionConfig,
    records::row::{Row, RowSet},
};
use mysql_async::{Opts, OptsBuilder, Pool, Transaction, TxOpts, prelude::*};
use planner::query::dialect;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct MySqlAdapter {
    pool: Pool,
    dialect: dialect::MySql,
}

pub fn mysql_opts(conn: &ConnectionConfig) -> Opts {
    OptsBuilder::default()
        .ip_or_hostname(conn.server.clone())
        .tcp_port(conn.port)
        .db_name(Some(conn.database.clone()))
        .user(Some(conn.username.clone()))
        .pass(Some(conn.password.clone()))
        .into()
}

impl MySqlAdapter {
    pub async fn connect(config: &ConnectionConfig) -> Result<Self, ConnectorError> {
        let pool = Pool::new(mysql_opts(config));

        // Fail here rather than on the first statement.
        let conn = pool.get_conn().await?;
        drop(conn);

        Ok(MySqlAdapter {
            pool,
            dialect: dialect::MySql,
        })
    }

    async fn write_rows(
        &self,
        tx: &mut Transaction<'_>,
        table: &TableRef,
        rows: &RowSet,
    ) -> Result<u64, ReplaceError> {
        let generator = QueryGenerator::new(&self.dialect);

        let delete = generator.delete_all(table);
        debug!("DELETE statement: {}", delete);
        tx.query_drop(delete)
            .await
            .map_err(|e| ReplaceError::new(WritePhase::Clear, e))?;
        let deleted = tx.affected_rows();

        for (index, row) in rows.iter().enumerate() {
            let (sql, params) = generator.insert_row(table, row);
            let bindings = MySqlParamStore::from_values(&params);
            tx.exec_drop(sql, bindings.params())
                .await
                .map_err(|e| ReplaceError::new(WritePhase::Insert { index, id: row.id }, e))?;
        }

        Ok(deleted)
    }
}

#[async_trait]
impl TableDestination for MySqlAdapter {
    fn kind(&self) -> DatabaseKind {
        DatabaseKind::MySql
    }

    async fn ensure_table(&self, table: &TableRef) -> Result<(), DbError> {
        let generator = QueryGenerator::new(&self.dialect);
        let sql = generator.create_table(table);
        debug!("CREATE statement: {}", sql);

        let mut conn = self.pool.get_conn().await?;
        conn.query_drop(sql).await?;
        Ok(())
    }

    async fn replace_rows(
        &self,
        table: &TableRef,
        rows: &RowSet,
    ) -> Result<ReplaceSummary, ReplaceError> {
        let mut conn = self
            .pool
            .get_conn()
            .await
            .map_err(|e| ReplaceError::new(WritePhase::Begin, e))?;
        let mut tx = conn
            .start_transaction(TxOpts::default())
            .await
            .map_err(|e| ReplaceError::new(WritePhase::Begin, e))?;

        match self.write_rows(&mut tx, table, rows).await {
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
                    warn!(%rollback_err, "MySQL rollback failed");
                }
                Err(err)
            }
        }
    }

    async fn read_rows(&self, table: &TableRef) -> Result<RowSet, DbError> {
        let generator = QueryGenerator::new(&self.dialect);
        let sql = generator.select_all(table);

        let mut conn = self.pool.get_conn().await?;
        let rows: Vec<(i32, Option<String>)> = conn.query(sql).await?;
        Ok(rows
            .into_iter()
            .map(|(id, name)| Row { id, name })
            .collect())
    }

    async fn close(&self) -> Result<(), DbError> {
        self.pool.clone().disconnect().await?;
        debug!("MySQL pool disconnected");
        Ok(())
    }
}
