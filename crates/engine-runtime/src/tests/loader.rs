use super::memory::{MemoryDatabase, MemoryFactory};
use crate::{
    error::LoadError,
    execution::{loader::TableLoader, stage::FlowStage},
};
use model::{
    core::identifiers::TableRef,
    execution::connection::{ConnectionConfig, DatabaseDialect},
    records::row::{Row, RowSet},
};
use std::sync::Arc;
use tracing_test::traced_test;
use uuid::Uuid;

fn people() -> TableRef {
    TableRef::new("dbo", "people").unwrap()
}

fn conn() -> ConnectionConfig {
    ConnectionConfig {
        dialect: DatabaseDialect::Postgres,
        server: "localhost".to_string(),
        port: 5432,
        database: "sales".to_string(),
        username: "loader".to_string(),
        password: "secret".to_string(),
        driver: "tabload".to_string(),
    }
}

fn input() -> RowSet {
    RowSet::new(vec![
        Row::new(1, "Alice"),
        Row::without_name(2),
        Row::new(3, "Carol"),
    ])
}

fn loader(factory: &MemoryFactory) -> TableLoader {
    TableLoader::new(Arc::new(factory.clone()), Uuid::new_v4())
}

#[tokio::test]
async fn test_load_replaces_existing_rows() {
    let db = MemoryDatabase::new().with_table(
        &people(),
        vec![Row::new(10, "Old"), Row::new(11, "Older")],
    );
    let factory = MemoryFactory::new(db);

    let outcome = loader(&factory).load(&input(), &people(), &conn()).await;

    let report = outcome.report().expect("load should succeed");
    assert_eq!(report.rows_deleted, 2);
    assert_eq!(report.rows_inserted, 3);
    assert!(report.verified);
    assert_eq!(report.contents, input());
    assert_eq!(factory.db.rows(&people()), Some(input()));
    assert_eq!(outcome.stage(), FlowStage::Done);
}

#[tokio::test]
async fn test_load_creates_missing_table() {
    let factory = MemoryFactory::new(MemoryDatabase::new());

    let outcome = loader(&factory).load(&input(), &people(), &conn()).await;

    assert!(outcome.is_loaded());
    assert_eq!(outcome.report().unwrap().rows_deleted, 0);
    assert_eq!(factory.db.rows(&people()), Some(input()));
}

#[tokio::test]
async fn test_load_is_idempotent() {
    let factory = MemoryFactory::new(MemoryDatabase::new());
    let loader = loader(&factory);

    let first = loader.load(&input(), &people(), &conn()).await;
    let second = loader.load(&input(), &people(), &conn()).await;

    assert!(first.is_loaded());
    let report = second.report().unwrap();
    assert_eq!(report.rows_deleted, 3);
    assert_eq!(report.rows_inserted, 3);
    assert_eq!(factory.db.rows(&people()), Some(input()));
}

#[tokio::test]
async fn test_load_empty_rowset_clears_table() {
    let db = MemoryDatabase::new().with_table(&people(), vec![Row::new(1, "Alice")]);
    let factory = MemoryFactory::new(db);

    let outcome = loader(&factory).load(&RowSet::default(), &people(), &conn()).await;

    let report = outcome.report().unwrap();
    assert_eq!(report.rows_deleted, 1);
    assert_eq!(report.rows_inserted, 0);
    assert!(report.contents.is_empty());
    assert!(report.verified);
}

#[tokio::test]
async fn test_failed_insert_leaves_table_untouched() {
    let before = vec![Row::new(10, "Old")];
    let db = MemoryDatabase::new()
        .with_table(&people(), before.clone())
        .failing_insert_at(1);
    let factory = MemoryFactory::new(db);

    let outcome = loader(&factory).load(&input(), &people(), &conn()).await;

    let failure = outcome.failure().expect("load should fail");
    assert_eq!(failure.stage, FlowStage::InsertRows);
    assert!(matches!(
        failure.error,
        LoadError::PartialWrite { index: 1, id: 2, .. }
    ));
    assert_eq!(factory.db.rows(&people()), Some(RowSet::new(before)));
    assert_eq!(factory.db.closes(), 1);
    assert_eq!(outcome.stage(), FlowStage::FailedLogged);
}

#[tokio::test]
async fn test_connection_failure_is_reported() {
    let factory = MemoryFactory::new(MemoryDatabase::new().refusing_connections());

    let outcome = loader(&factory).load(&input(), &people(), &conn()).await;

    let failure = outcome.failure().unwrap();
    assert_eq!(failure.stage, FlowStage::EnsureTable);
    assert_eq!(failure.error.kind(), "connection");
    assert_eq!(factory.db.opens(), 1);
    assert_eq!(factory.db.closes(), 0);
    assert_eq!(factory.db.statements(), 0);
}

#[tokio::test]
async fn test_schema_failure_still_closes_connection() {
    let factory = MemoryFactory::new(MemoryDatabase::new().failing_create());

    let outcome = loader(&factory).load(&input(), &people(), &conn()).await;

    let failure = outcome.failure().unwrap();
    assert_eq!(failure.stage, FlowStage::EnsureTable);
    assert!(matches!(failure.error, LoadError::Schema(_)));
    assert_eq!(factory.db.closes(), 1);
    assert_eq!(factory.db.rows(&people()), None);

    let summary = failure.summary();
    assert_eq!(summary.kind, "schema");
    assert!(summary.message.contains("already an object named"));
}

#[tokio::test]
#[traced_test]
async fn test_load_logs_affected_rows_and_contents() {
    let db = MemoryDatabase::new().with_table(
        &people(),
        vec![Row::new(10, "Old"), Row::new(11, "Older")],
    );
    let factory = MemoryFactory::new(db);

    let outcome = loader(&factory).load(&input(), &people(), &conn()).await;

    assert!(outcome.is_loaded());
    assert!(logs_contain("DELETE statement executed. Rows affected: 2"));
    assert!(logs_contain("Data inserted successfully in table dbo.people"));
    assert!(logs_contain("Data in table dbo.people (3 rows)"));
    assert!(logs_contain("dbo.people row (2, NULL)"));
    assert!(logs_contain("dbo.people row (3, \"Carol\")"));
}

#[tokio::test]
#[traced_test]
async fn test_load_logs_destination_kind() {
    let factory = MemoryFactory::new(MemoryDatabase::new());

    let outcome = loader(&factory).load(&input(), &people(), &conn()).await;

    assert!(outcome.is_loaded());
    assert!(logs_contain("Connected to memory for dbo.people"));
}

#[tokio::test]
#[traced_test]
async fn test_failure_is_logged() {
    let factory = MemoryFactory::new(MemoryDatabase::new().failing_insert_at(0));

    let outcome = loader(&factory).load(&input(), &people(), &conn()).await;

    assert!(!outcome.is_loaded());
    assert!(logs_contain("Error creating table or inserting data into dbo.people"));
    assert!(!logs_contain("Data inserted successfully"));
}

#[tokio::test]
async fn test_begin_failure_is_a_connection_error() {
    let before = vec![Row::new(10, "Old")];
    let db = MemoryDatabase::new()
        .with_table(&people(), before.clone())
        .failing_begin();
    let factory = MemoryFactory::new(db);

    let outcome = loader(&factory).load(&input(), &people(), &conn()).await;

    let failure = outcome.failure().unwrap();
    assert_eq!(failure.stage, FlowStage::ClearTable);
    assert!(matches!(failure.error, LoadError::ConnectionLost(_)));
    assert_eq!(failure.error.kind(), "connection");
    assert_eq!(factory.db.rows(&people()), Some(RowSet::new(before)));
    assert_eq!(factory.db.closes(), 1);
}

#[tokio::test]
async fn test_clear_failure_leaves_table_untouched() {
    let before = vec![Row::new(10, "Old"), Row::new(11, "Older")];
    let db = MemoryDatabase::new()
        .with_table(&people(), before.clone())
        .failing_clear();
    let factory = MemoryFactory::new(db);

    let outcome = loader(&factory).load(&input(), &people(), &conn()).await;

    let failure = outcome.failure().unwrap();
    assert_eq!(failure.stage, FlowStage::ClearTable);
    assert!(matches!(failure.error, LoadError::Clear(_)));
    assert_eq!(failure.summary().kind, "clear");
    assert!(failure.summary().message.contains("permission denied"));
    assert_eq!(factory.db.rows(&people()), Some(RowSet::new(before)));
    assert_eq!(factory.db.closes(), 1);
}

#[tokio::test]
async fn test_commit_failure_leaves_table_untouched() {
    let before = vec![Row::new(10, "Old")];
    let db = MemoryDatabase::new()
        .with_table(&people(), before.clone())
        .failing_commit();
    let factory = MemoryFactory::new(db);

    let outcome = loader(&factory).load(&input(), &people(), &conn()).await;

    let failure = outcome.failure().unwrap();
    assert_eq!(failure.stage, FlowStage::InsertRows);
    assert!(matches!(failure.error, LoadError::Commit(_)));
    assert_eq!(failure.error.kind(), "commit");
    assert_eq!(factory.db.rows(&people()), Some(RowSet::new(before)));
    assert_eq!(factory.db.closes(), 1);
}

#[tokio::test]
async fn test_read_back_failure_is_reported_at_verify() {
    let factory = MemoryFactory::new(MemoryDatabase::new().failing_read());

    let outcome = loader(&factory).load(&input(), &people(), &conn()).await;

    let failure = outcome.failure().unwrap();
    assert_eq!(failure.stage, FlowStage::Verify);
    assert!(matches!(failure.error, LoadError::Verify(_)));
    assert_eq!(failure.error.kind(), "verify");
    // The replace already committed.
    assert_eq!(factory.db.rows(&people()), Some(input()));
    assert_eq!(factory.db.closes(), 1);
}

#[tokio::test]
#[traced_test]
async fn test_read_back_mismatch_is_unverified() {
    let factory = MemoryFactory::new(MemoryDatabase::new().losing_last_row_on_read());

    let outcome = loader(&factory).load(&input(), &people(), &conn()).await;

    let report = outcome.report().expect("a mismatch is not a failure");
    assert!(!report.verified);
    assert_eq!(report.rows_inserted, 3);
    assert_eq!(report.contents.len(), 2);
    assert_eq!(outcome.stage(), FlowStage::Done);
    assert!(logs_contain(
        "Read-back of dbo.people does not match the loaded rows (3 expected, 2 found)"
    ));
}
