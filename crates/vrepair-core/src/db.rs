//! The `Database` trait and the value types that cross it.
//!
//! The trait is implemented by storage backends (e.g. `vrepair-store-sqlite`).
//! The sweep depends on this abstraction, never on a concrete connection, so
//! tests can substitute an in-memory database or a recording wrapper.

use std::future::Future;

// ─── Values ──────────────────────────────────────────────────────────────────

/// A bound parameter or a result column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
  Null,
  Integer(i64),
  Text(String),
}

impl SqlValue {
  pub fn as_i64(&self) -> Option<i64> {
    match self {
      SqlValue::Integer(i) => Some(*i),
      _ => None,
    }
  }
}

impl From<i64> for SqlValue {
  fn from(i: i64) -> Self { SqlValue::Integer(i) }
}

impl From<&str> for SqlValue {
  fn from(s: &str) -> Self { SqlValue::Text(s.to_owned()) }
}

impl From<String> for SqlValue {
  fn from(s: String) -> Self { SqlValue::Text(s) }
}

/// One result row, columns in `SELECT` order.
pub type Row = Vec<SqlValue>;

/// Quote an identifier for interpolation into SQL text.
///
/// Table names cannot be bound as parameters, so they are the only thing the
/// sweep ever splices into a statement. Embedded quotes are doubled.
pub fn quote_ident(name: &str) -> String {
  format!("\"{}\"", name.replace('"', "\"\""))
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Parameterised query execution, schema introspection, and the
/// schema-maintenance scope the sweep runs inside.
///
/// Statements use `?1`, `?2`, ... placeholders; every value is passed in
/// `args`, never formatted into the SQL text.
pub trait Database: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Whether a table named `name` exists.
  fn table_exists<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Run a query and collect every row.
  fn query<'a>(
    &'a self,
    sql: &'a str,
    args: Vec<SqlValue>,
  ) -> impl Future<Output = Result<Vec<Row>, Self::Error>> + Send + 'a;

  /// Run a statement, returning the number of affected rows.
  fn execute<'a>(
    &'a self,
    sql: &'a str,
    args: Vec<SqlValue>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;

  // ── Maintenance scope ─────────────────────────────────────────────────

  /// Open the schema-maintenance scope. Deletions made before
  /// [`commit_maintenance`](Database::commit_maintenance) are not durable.
  fn begin_maintenance(
    &self,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn commit_maintenance(
    &self,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Abandon the scope, discarding everything done since it was opened.
  fn rollback_maintenance(
    &self,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
