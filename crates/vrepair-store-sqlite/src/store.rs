//! [`SqliteDatabase`] — the SQLite implementation of [`Database`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use vrepair_core::db::{Database, Row, SqlValue};

use crate::{
  Error, Result,
  encode::{decode_value, encode_value},
};

/// A handle on a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. The
/// maintenance scope is a transaction on that one connection, so every clone
/// shares it.
#[derive(Clone)]
pub struct SqliteDatabase {
  conn: tokio_rusqlite::Connection,
}

impl SqliteDatabase {
  /// Open an existing database file.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Ok(Self { conn })
  }

  /// Open an empty in-memory database — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Ok(Self { conn })
  }

  /// Run a batch of semicolon-separated statements with no parameters.
  pub async fn execute_batch(&self, sql: impl Into<String>) -> Result<()> {
    let sql = sql.into();
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(&sql)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn run_batch(&self, sql: &'static str) -> Result<()> {
    tracing::debug!(sql, "maintenance scope");
    self.execute_batch(sql).await
  }
}

// ─── Database impl ───────────────────────────────────────────────────────────

impl Database for SqliteDatabase {
  type Error = Error;

  async fn table_exists(&self, name: &str) -> Result<bool> {
    let name = name.to_owned();

    let exists = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
              rusqlite::params![name],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;

    Ok(exists)
  }

  async fn query(&self, sql: &str, args: Vec<SqlValue>) -> Result<Vec<Row>> {
    let sql = sql.to_owned();
    tracing::debug!(%sql, ?args, "query");

    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let width = stmt.column_count();
        let params = rusqlite::params_from_iter(args.into_iter().map(encode_value));
        let rows = stmt
          .query_map(params, |row| {
            (0..width)
              .map(|i| row.get_ref(i).map(decode_value))
              .collect::<rusqlite::Result<Row>>()
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(rows)
  }

  async fn execute(&self, sql: &str, args: Vec<SqlValue>) -> Result<usize> {
    let sql = sql.to_owned();
    tracing::debug!(%sql, ?args, "execute");

    let affected = self
      .conn
      .call(move |conn| {
        let params = rusqlite::params_from_iter(args.into_iter().map(encode_value));
        Ok(conn.execute(&sql, params)?)
      })
      .await?;

    Ok(affected)
  }

  async fn begin_maintenance(&self) -> Result<()> {
    self.run_batch("BEGIN IMMEDIATE").await
  }

  async fn commit_maintenance(&self) -> Result<()> {
    self.run_batch("COMMIT").await
  }

  async fn rollback_maintenance(&self) -> Result<()> {
    self.run_batch("ROLLBACK").await
  }
}
