use serde::Serialize;
use std::fmt;

/// Linear progression of a flow run.
///
/// `START -> READ_CSV -> ENSURE_TABLE -> CLEAR_TABLE -> INSERT_ROWS -> VERIFY -> DONE`,
/// with `FAILED_LOGGED` reachable from any database stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlowStage {
    Start,
    ReadCsv,
    EnsureTable,
    ClearTable,
    InsertRows,
    Verify,
    Done,
    FailedLogged,
}

impl fmt::Display for FlowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlowStage::Start => "START",
            FlowStage::ReadCsv => "READ_CSV",
            FlowStage::EnsureTable => "ENSURE_TABLE",
            FlowStage::ClearTable => "CLEAR_TABLE",
            FlowStage::InsertRows => "INSERT_ROWS",
            FlowStage::Verify => "VERIFY",
            FlowStage::Done => "DONE",
            FlowStage::FailedLogged => "FAILED_LOGGED",
        };
        f.write_str(name)
    }
}
