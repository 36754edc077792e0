//! Integration tests for `SqliteDatabase` against an in-memory database.

use vrepair_core::db::{Database, SqlValue};

use crate::SqliteDatabase;

async fn db() -> SqliteDatabase {
  let db = SqliteDatabase::open_in_memory()
    .await
    .expect("in-memory database");
  db.execute_batch(
    "CREATE TABLE \"Page_versions\" (
       ID       INTEGER PRIMARY KEY,
       RecordID INTEGER NOT NULL,
       Version  INTEGER NOT NULL,
       Title    TEXT
     );
     INSERT INTO \"Page_versions\" VALUES (1, 10, 1, 'Home');
     INSERT INTO \"Page_versions\" VALUES (2, 10, 2, NULL);",
  )
  .await
  .expect("fixture");
  db
}

async fn count(db: &SqliteDatabase) -> i64 {
  let rows = db
    .query("SELECT COUNT(*) FROM \"Page_versions\"", vec![])
    .await
    .unwrap();
  rows[0][0].as_i64().unwrap()
}

// ─── Introspection ───────────────────────────────────────────────────────────

#[tokio::test]
async fn table_exists_reports_present_and_missing_tables() {
  let db = db().await;
  assert!(db.table_exists("Page_versions").await.unwrap());
  assert!(!db.table_exists("SiteTree_versions").await.unwrap());
}

// ─── Query / execute ─────────────────────────────────────────────────────────

#[tokio::test]
async fn query_decodes_integers_text_and_null() {
  let db = db().await;
  let rows = db
    .query(
      "SELECT ID, Title FROM \"Page_versions\" WHERE RecordID = ?1 ORDER BY ID",
      vec![SqlValue::Integer(10)],
    )
    .await
    .unwrap();

  assert_eq!(rows, vec![
    vec![SqlValue::Integer(1), SqlValue::Text("Home".into())],
    vec![SqlValue::Integer(2), SqlValue::Null],
  ]);
}

#[tokio::test]
async fn execute_binds_parameters_and_reports_affected_rows() {
  let db = db().await;
  let affected = db
    .execute(
      "DELETE FROM \"Page_versions\" WHERE RecordID = ?1 AND Version = ?2",
      vec![SqlValue::Integer(10), SqlValue::Integer(2)],
    )
    .await
    .unwrap();
  assert_eq!(affected, 1);
  assert_eq!(count(&db).await, 1);
}

#[tokio::test]
async fn bound_text_is_never_interpreted_as_sql() {
  let db = db().await;
  let affected = db
    .execute(
      "DELETE FROM \"Page_versions\" WHERE Title = ?1",
      vec!["x' OR '1'='1".into()],
    )
    .await
    .unwrap();
  assert_eq!(affected, 0);
  assert_eq!(count(&db).await, 2);
}

#[tokio::test]
async fn invalid_sql_is_an_error() {
  let db = db().await;
  assert!(db.query("SELECT * FROM \"Nope\"", vec![]).await.is_err());
}

// ─── Maintenance scope ───────────────────────────────────────────────────────

#[tokio::test]
async fn rollback_discards_deletions() {
  let db = db().await;
  db.begin_maintenance().await.unwrap();
  db.execute("DELETE FROM \"Page_versions\"", vec![])
    .await
    .unwrap();
  assert_eq!(count(&db).await, 0);
  db.rollback_maintenance().await.unwrap();
  assert_eq!(count(&db).await, 2);
}

#[tokio::test]
async fn commit_keeps_deletions() {
  let db = db().await;
  db.begin_maintenance().await.unwrap();
  db.execute("DELETE FROM \"Page_versions\" WHERE ID = ?1", vec![SqlValue::Integer(1)])
    .await
    .unwrap();
  db.commit_maintenance().await.unwrap();
  assert_eq!(count(&db).await, 1);
}

#[tokio::test]
async fn nested_begin_is_an_error() {
  let db = db().await;
  db.begin_maintenance().await.unwrap();
  assert!(db.begin_maintenance().await.is_err());
  db.rollback_maintenance().await.unwrap();
}
