use crate::{error::LoadError, execution::stage::FlowStage};
use chrono::{DateTime, Utc};
use connectors::sql::base::destination::{ReplaceError, WritePhase};
use model::{core::identifiers::TableRef, records::row::RowSet};
use serde::Serialize;
use uuid::Uuid;

/// Result of the database stage of one flow run.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(LoadReport),
    Failed(LoadFailure),
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded(_))
    }

    pub fn report(&self) -> Option<&LoadReport> {
        match self {
            LoadOutcome::Loaded(report) => Some(report),
            LoadOutcome::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&LoadFailure> {
        match self {
            LoadOutcome::Loaded(_) => None,
            LoadOutcome::Failed(failure) => Some(failure),
        }
    }

    /// Final stage reached: `DONE` or `FAILED_LOGGED`.
    pub fn stage(&self) -> FlowStage {
        match self {
            LoadOutcome::Loaded(_) => FlowStage::Done,
            LoadOutcome::Failed(_) => FlowStage::FailedLogged,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub run_id: Uuid,
    pub table: TableRef,
    pub rows_deleted: u64,
    pub rows_inserted: u64,
    /// Destination contents read back after the commit.
    pub contents: RowSet,
    /// Whether `contents` holds exactly the rows that were loaded.
    pub verified: bool,
    pub took_ms: u64,
    pub finished_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct LoadFailure {
    pub run_id: Uuid,
    pub table: TableRef,
    /// Stage that was running when the error happened.
    pub stage: FlowStage,
    pub error: LoadError,
}

impl LoadFailure {
    pub fn new(run_id: Uuid, table: &TableRef, stage: FlowStage, error: LoadError) -> Self {
        Self {
            run_id,
            table: table.clone(),
            stage,
            error,
        }
    }

    pub fn from_replace(run_id: Uuid, table: &TableRef, err: ReplaceError) -> Self {
        let ReplaceError { phase, source } = err;
        let (stage, error) = match phase {
            WritePhase::Begin => (FlowStage::ClearTable, LoadError::ConnectionLost(source)),
            WritePhase::Clear => (FlowStage::ClearTable, LoadError::Clear(source)),
            WritePhase::Insert { index, id } => (
                FlowStage::InsertRows,
                LoadError::PartialWrite { index, id, source },
            ),
            WritePhase::Commit => (FlowStage::InsertRows, LoadError::Commit(source)),
        };
        Self::new(run_id, table, stage, error)
    }

    pub fn summary(&self) -> FailureSummary {
        FailureSummary {
            run_id: self.run_id,
            table: self.table.clone(),
            stage: self.stage,
            kind: self.error.kind(),
            message: self.error.to_string(),
        }
    }
}

/// Serializable view of a [`LoadFailure`].
#[derive(Debug, Clone, Serialize)]
pub struct FailureSummary {
    pub run_id: Uuid,
    pub table: TableRef,
    pub stage: FlowStage,
    pub kind: &'static str,
    pub message: String,
}
