//! Collapsing duplicate `(RecordID, Version)` rows.

use vrepair_core::{
  db::{Database, Row, SqlValue, quote_ident},
  table::VersionedTable,
};

use crate::{Result, SweepError};

/// What [`collapse_duplicates`] did to one table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollapseOutcome {
  /// `(RecordID, Version)` groups that had more than one row.
  pub groups:       usize,
  pub rows_deleted: usize,
}

/// One duplicated `(RecordID, Version)` and the row that survives it.
struct DuplicateGroup {
  survivor_id: i64,
  record_id:   i64,
  version:     i64,
}

/// Remove every duplicate history row of `table`, keeping the row with the
/// lowest `ID` for each `(RecordID, Version)`.
///
/// The groups and their survivors are found in a single aggregate query; each
/// group is then cleared with one bound `DELETE`.
pub async fn collapse_duplicates<D: Database>(
  db: &D,
  table: &VersionedTable,
) -> Result<CollapseOutcome> {
  let versions = table.versions_table();
  let quoted = quote_ident(&versions);

  let find = format!(
    "SELECT MIN(\"ID\"), \"RecordID\", \"Version\" FROM {quoted} \
     GROUP BY \"RecordID\", \"Version\" HAVING COUNT(*) > 1 \
     ORDER BY \"RecordID\", \"Version\""
  );
  let rows = db
    .query(&find, Vec::new())
    .await
    .map_err(SweepError::database(versions.as_str()))?;

  let groups = rows
    .into_iter()
    .map(|row| decode_group(&versions, row))
    .collect::<Result<Vec<_>>>()?;

  let delete = format!(
    "DELETE FROM {quoted} WHERE \"RecordID\" = ?1 AND \"Version\" = ?2 AND \"ID\" != ?3"
  );

  let mut outcome = CollapseOutcome { groups: groups.len(), rows_deleted: 0 };
  for group in groups {
    let deleted = db
      .execute(&delete, vec![
        SqlValue::Integer(group.record_id),
        SqlValue::Integer(group.version),
        SqlValue::Integer(group.survivor_id),
      ])
      .await
      .map_err(SweepError::database(versions.as_str()))?;

    tracing::info!(
      "Removed {deleted} duplicate rows from {versions} for RecordID {} Version {} (kept ID {})",
      group.record_id,
      group.version,
      group.survivor_id
    );
    outcome.rows_deleted += deleted;
  }

  Ok(outcome)
}

fn decode_group(table: &str, row: Row) -> Result<DuplicateGroup> {
  match row.as_slice() {
    [id, record, version] => {
      match (id.as_i64(), record.as_i64(), version.as_i64()) {
        (Some(survivor_id), Some(record_id), Some(version)) => {
          Ok(DuplicateGroup { survivor_id, record_id, version })
        }
        _ => Err(SweepError::MalformedRow {
          table:  table.to_owned(),
          detail: format!("non-integer key columns in {row:?}"),
        }),
      }
    }
    _ => Err(SweepError::MalformedRow {
      table:  table.to_owned(),
      detail: format!("expected 3 columns, got {}", row.len()),
    }),
  }
}
