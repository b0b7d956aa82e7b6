use crate::{
    error::LoadError,
    execution::{
        outcome::{LoadFailure, LoadOutcome, LoadReport},
        stage::FlowStage,
    },
};
use chrono::Utc;
use connectors::sql::base::destination::{DestinationFactory, TableDestination};
use model::{
    core::identifiers::TableRef,
    execution::connection::ConnectionConfig,
    records::row::RowSet,
};
use std::{sync::Arc, time::Instant};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Replaces the contents of one table with a row set.
///
/// Every database error is caught here, logged, and returned as
/// [`LoadOutcome::Failed`]; the caller never sees a panic or an `Err`.
pub struct TableLoader {
    factory: Arc<dyn DestinationFactory>,
    run_id: Uuid,
}

impl TableLoader {
    pub fn new(factory: Arc<dyn DestinationFactory>, run_id: Uuid) -> Self {
        Self { factory, run_id }
    }

    pub async fn load(
        &self,
        rows: &RowSet,
        table: &TableRef,
        conn: &ConnectionConfig,
    ) -> LoadOutcome {
        let start = Instant::now();
        enter(FlowStage::EnsureTable);

        let destination = match self.factory.open(conn).await {
            Ok(destination) => destination,
            Err(err) => {
                return self.failed(LoadFailure::new(
                    self.run_id,
                    table,
                    FlowStage::EnsureTable,
                    LoadError::Connection(err),
                ));
            }
        };

        info!("Connected to {} for {}", destination.kind(), table);

        let result = self.load_into(destination.as_ref(), rows, table).await;

        // Released on success and failure alike.
        if let Err(err) = destination.close().await {
            warn!(%err, "Failed to close the database connection");
        }

        match result {
            Ok(mut report) => {
                report.took_ms = start.elapsed().as_millis() as u64;
                enter(FlowStage::Done);
                info!(
                    "Load of {} finished in {} ms ({} rows deleted, {} rows inserted)",
                    table, report.took_ms, report.rows_deleted, report.rows_inserted
                );
                LoadOutcome::Loaded(report)
            }
            Err(failure) => self.failed(failure),
        }
    }

    async fn load_into(
        &self,
        destination: &dyn TableDestination,
        rows: &RowSet,
        table: &TableRef,
    ) -> Result<LoadReport, LoadFailure> {
        destination.ensure_table(table).await.map_err(|e| {
            LoadFailure::new(self.run_id, table, FlowStage::EnsureTable, LoadError::Schema(e))
        })?;
        info!(
            "Table named {} is ready in the schema {}",
            table.table(),
            table.schema()
        );

        // Clear and insert share one transaction, so both stages are entered
        // before the single replace call.
        enter(FlowStage::ClearTable);
        enter(FlowStage::InsertRows);
        let summary = destination
            .replace_rows(table, rows)
            .await
            .map_err(|e| LoadFailure::from_replace(self.run_id, table, e))?;
        info!("DELETE statement executed. Rows affected: {}", summary.rows_deleted);
        info!("Data inserted successfully in table {}", table);

        enter(FlowStage::Verify);
        let contents = destination.read_rows(table).await.map_err(|e| {
            LoadFailure::new(self.run_id, table, FlowStage::Verify, LoadError::Verify(e))
        })?;
        info!("Data in table {} ({} rows)", table, contents.len());
        for row in &contents {
            debug!("{} row {}", table, row);
        }

        let verified = contents.same_rows(rows);
        if !verified {
            warn!(
                "Read-back of {} does not match the loaded rows ({} expected, {} found)",
                table,
                rows.len(),
                contents.len()
            );
        }

        Ok(LoadReport {
            run_id: self.run_id,
            table: table.clone(),
            rows_deleted: summary.rows_deleted,
            rows_inserted: summary.rows_inserted,
            contents,
            verified,
            took_ms: 0,
            finished_at: Utc::now(),
        })
    }

    fn failed(&self, failure: LoadFailure) -> LoadOutcome {
        error!(
            stage = %failure.stage,
            kind = failure.error.kind(),
            "Error creating table or inserting data into {}: {}",
            failure.table,
            failure.error
        );
        enter(FlowStage::FailedLogged);
        LoadOutcome::Failed(failure)
    }
}

fn enter(stage: FlowStage) {
    debug!(%stage, "Entering stage");
}
