use crate::{
    error::FlowError,
    execution::{loader::TableLoader, outcome::LoadOutcome, stage::FlowStage},
};
use connectors::{file::csv::read_rowset, sql::base::destination::DestinationFactory};
use engine_config::{secrets::SecretProvider, settings::FlowSettings};
use std::{path::Path, sync::Arc};
use tracing::{Instrument, debug, info, info_span};
use uuid::Uuid;

/// Reads `file_path` and replaces the configured table with its rows.
///
/// Configuration and source errors are returned as `Err` before any
/// database work starts. Database errors are reported through
/// [`LoadOutcome::Failed`].
pub async fn run(
    file_path: impl AsRef<Path>,
    secrets: &dyn SecretProvider,
    factory: Arc<dyn DestinationFactory>,
) -> Result<LoadOutcome, FlowError> {
    FlowExecutor::new(secrets, factory)
        .execute(file_path.as_ref())
        .await
}

pub struct FlowExecutor<'a> {
    secrets: &'a dyn SecretProvider,
    factory: Arc<dyn DestinationFactory>,
}

impl<'a> FlowExecutor<'a> {
    pub fn new(secrets: &'a dyn SecretProvider, factory: Arc<dyn DestinationFactory>) -> Self {
        Self { secrets, factory }
    }

    pub async fn execute(&self, file_path: &Path) -> Result<LoadOutcome, FlowError> {
        let run_id = Uuid::new_v4();
        let span = info_span!("flow", %run_id);
        self.execute_run(run_id, file_path).instrument(span).await
    }

    async fn execute_run(&self, run_id: Uuid, file_path: &Path) -> Result<LoadOutcome, FlowError> {
        debug!(stage = %FlowStage::Start, "Entering stage");
        info!("Starting load of {}", file_path.display());

        // Secrets first: a configuration error must stop the run before any I/O.
        let settings = FlowSettings::resolve(self.secrets)?;

        debug!(stage = %FlowStage::ReadCsv, "Entering stage");
        let rows = read_rowset(file_path)?;
        debug!("Read {} rows from {}", rows.len(), file_path.display());
        for row in &rows {
            debug!("File row {}", row);
        }

        let loader = TableLoader::new(Arc::clone(&self.factory), run_id);
        let outcome = loader
            .load(&rows, &settings.table, &settings.connection)
            .await;

        info!(stage = %outcome.stage(), "Flow finished");
        Ok(outcome)
    }
}
