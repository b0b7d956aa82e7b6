use crate::error::CliError;
use engine_runtime::execution::outcome::LoadOutcome;
use std::path::Path;

fn outcome_json(outcome: &LoadOutcome) -> Result<String, CliError> {
    let json = match outcome {
        LoadOutcome::Loaded(report) => serde_json::to_string_pretty(report)?,
        LoadOutcome::Failed(failure) => serde_json::to_string_pretty(&failure.summary())?,
    };
    Ok(json)
}

pub async fn write_report(outcome: &LoadOutcome, path: &Path) -> Result<(), CliError> {
    let json = outcome_json(outcome)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use connectors::sql::base::error::ConnectorError;
    use engine_runtime::{
        error::LoadError,
        execution::{outcome::LoadFailure, stage::FlowStage},
    };
    use model::core::identifiers::TableRef;

    #[tokio::test]
    async fn test_failure_report_written_as_json() {
        let failure = LoadFailure::new(
            Default::default(),
            &TableRef::new("dbo", "people").unwrap(),
            FlowStage::EnsureTable,
            LoadError::Connection(ConnectorError::InvalidConfig("refused".to_string())),
        );
        let outcome = LoadOutcome::Failed(failure);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        write_report(&outcome, &path).await.unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["stage"], "ENSURE_TABLE");
        assert_eq!(json["kind"], "connection");
        assert_eq!(json["table"]["table"], "people");
    }
}
