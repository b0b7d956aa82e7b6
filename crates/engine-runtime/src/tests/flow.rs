use super::memory::{MemoryDatabase, MemoryFactory};
use crate::{
    error::FlowError,
    execution::{executor::run, stage::FlowStage},
};
use connectors::file::csv::error::FileError;
use engine_config::{
    secrets::StaticSecrets,
    settings::{
        DATABASE_NAME, DRIVER, PASSWORD, SCHEMA_NAME, SERVER_NAME, TABLE_NAME, USERNAME,
        error::SettingsError,
    },
};
use model::{
    core::identifiers::TableRef,
    records::row::{Row, RowSet},
};
use std::{io::Write, path::PathBuf, sync::Arc};
use tempfile::{NamedTempFile, TempDir};

fn secrets() -> StaticSecrets {
    StaticSecrets::new()
        .with(SERVER_NAME, "localhost")
        .with(DATABASE_NAME, "sales")
        .with(USERNAME, "loader")
        .with(PASSWORD, "secret")
        .with(DRIVER, "tabload")
        .with(SCHEMA_NAME, "dbo")
        .with(TABLE_NAME, "people")
}

fn people() -> TableRef {
    TableRef::new("dbo", "people").unwrap()
}

fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[tokio::test]
async fn test_run_loads_csv_into_table() {
    let file = csv_file("ID,Name\n1,Alice\n2,\n3,Carol\n");
    let factory = MemoryFactory::new(MemoryDatabase::new());

    let outcome = run(file.path(), &secrets(), Arc::new(factory.clone()))
        .await
        .unwrap();

    let expected = RowSet::new(vec![
        Row::new(1, "Alice"),
        Row::without_name(2),
        Row::new(3, "Carol"),
    ]);
    let report = outcome.report().expect("flow should load");
    assert_eq!(report.table, people());
    assert_eq!(report.contents, expected);
    assert!(report.verified);
    assert_eq!(factory.db.rows(&people()), Some(expected));
    assert_eq!(factory.db.opens(), 1);
    assert_eq!(factory.db.closes(), 1);
}

#[tokio::test]
async fn test_missing_secret_stops_before_any_io() {
    let mut secrets = secrets();
    secrets.remove(TABLE_NAME);
    secrets.remove(PASSWORD);
    let factory = MemoryFactory::new(MemoryDatabase::new());

    // The file does not exist either: configuration is checked first.
    let err = run("does/not/exist.csv", &secrets, Arc::new(factory.clone()))
        .await
        .unwrap_err();

    match err {
        FlowError::Settings(SettingsError::MissingSecrets(names)) => {
            assert!(names.contains(&TABLE_NAME.to_string()));
            assert!(names.contains(&PASSWORD.to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(factory.db.opens(), 0);
}

#[tokio::test]
async fn test_missing_file_stops_before_database() {
    let dir = TempDir::new().unwrap();
    let path: PathBuf = dir.path().join("missing.csv");
    let factory = MemoryFactory::new(MemoryDatabase::new());

    let err = run(&path, &secrets(), Arc::new(factory.clone()))
        .await
        .unwrap_err();

    assert!(matches!(err, FlowError::Source(FileError::NotFound(_))));
    assert_eq!(factory.db.opens(), 0);
}

#[tokio::test]
async fn test_invalid_row_stops_before_database() {
    let file = csv_file("ID,Name\n1,Alice\nabc,Bob\n");
    let db = MemoryDatabase::new().with_table(&people(), vec![Row::new(7, "Kept")]);
    let factory = MemoryFactory::new(db);

    let err = run(file.path(), &secrets(), Arc::new(factory.clone()))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        FlowError::Source(FileError::InvalidRow { line: 3, .. })
    ));
    assert_eq!(factory.db.opens(), 0);
    assert_eq!(
        factory.db.rows(&people()),
        Some(RowSet::new(vec![Row::new(7, "Kept")]))
    );
}

#[tokio::test]
async fn test_database_failure_is_an_outcome_not_an_error() {
    let file = csv_file("ID,Name\n1,Alice\n");
    let factory = MemoryFactory::new(MemoryDatabase::new().refusing_connections());

    let outcome = run(file.path(), &secrets(), Arc::new(factory))
        .await
        .expect("database failures do not abort the flow");

    assert!(!outcome.is_loaded());
    assert_eq!(outcome.stage(), FlowStage::FailedLogged);
    assert_eq!(outcome.failure().unwrap().stage, FlowStage::EnsureTable);
}

#[tokio::test]
async fn test_report_serializes_to_json() {
    let file = csv_file("ID,Name\n5,Eve\n");
    let factory = MemoryFactory::new(MemoryDatabase::new());

    let outcome = run(file.path(), &secrets(), Arc::new(factory)).await.unwrap();
    let json = serde_json::to_value(outcome.report().unwrap()).unwrap();

    assert_eq!(json["rows_inserted"], 1);
    assert_eq!(json["verified"], true);
    assert_eq!(json["table"]["schema"], "dbo");
    assert_eq!(json["contents"][0]["id"], 5);
    assert_eq!(json["contents"][0]["name"], "Eve");
}
