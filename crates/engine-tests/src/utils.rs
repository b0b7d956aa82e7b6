#![allow(dead_code)]

use crate::{mysql_pool, pg_client};
use model::records::row::{Row, RowSet};
use mysql_async::prelude::Queryable;
use std::io::Write;
use tempfile::NamedTempFile;

/// The type of database to use for the test
pub enum DbType {
    MySql,
    Postgres,
}

/// Writes `contents` to a temporary CSV file that lives as long as the handle.
pub fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write csv");
    file.flush().expect("flush csv");
    file
}

pub async fn execute(sql: &str) {
    let client = pg_client().await;
    client.batch_execute(sql).await.expect("execute sql");
}

pub async fn execute_mysql(sql: &str) {
    let pool = mysql_pool();
    let mut conn = pool.get_conn().await.expect("mysql connection");
    conn.query_drop(sql).await.expect("execute sql");
    drop(conn);
    pool.disconnect().await.expect("disconnect mysql");
}

/// All rows of `table`, ordered by ID.
pub async fn fetch_rows(table: &str, db: DbType) -> RowSet {
    match db {
        DbType::Postgres => {
            let client = pg_client().await;
            let rows = client
                .query(&format!(r#"SELECT "ID", "Name" FROM {table} ORDER BY "ID""#), &[])
                .await
                .expect("select rows");
            rows.iter()
                .map(|row| Row {
                    id: row.get(0),
                    name: row.get(1),
                })
                .collect()
        }
        DbType::MySql => {
            let pool = mysql_pool();
            let mut conn = pool.get_conn().await.expect("mysql connection");
            let rows: Vec<(i32, Option<String>)> = conn
                .query(format!("SELECT `ID`, `Name` FROM {table} ORDER BY `ID`"))
                .await
                .expect("select rows");
            drop(conn);
            pool.disconnect().await.expect("disconnect mysql");
            rows.into_iter().map(|(id, name)| Row { id, name }).collect()
        }
    }
}

pub async fn assert_table_exists(schema: &str, table: &str, should: bool) {
    let client = pg_client().await;
    let row = client
        .query_one(
            r#"
        SELECT EXISTS (
          SELECT 1
            FROM information_schema.tables
           WHERE table_schema = $1
             AND table_name = $2
        );
        "#,
            &[&schema, &table],
        )
        .await
        .expect("query information_schema");
    let exists: bool = row.get(0);
    assert_eq!(
        exists, should,
        "expected table '{schema}.{table}' existence == {should}"
    );
}
