//! Pruning history rows orphaned relative to ancestor tables.

use vrepair_core::{
  db::{Database, SqlValue, quote_ident},
  registry::ClassRegistry,
  table::VersionedTable,
};

use crate::{Result, SweepError};

/// What [`prune_orphans`] did to one table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneOutcome {
  /// Ancestor history tables that existed and were compared against.
  pub ancestors_checked: usize,
  pub rows_deleted:      usize,
}

/// Delete rows of `table`'s history that have no row with the same
/// `(RecordID, Version)` in some proper ancestor's history.
///
/// Ancestors are visited root first and each is checked on its own against
/// whatever rows are left, so a row removed for one ancestor is not looked at
/// again. A side table is checked against each ancestor's primary history
/// and then against the ancestor's side table of the same suffix
/// (`Page_Localised` against `SiteTree`, then `SiteTree_Localised`). A table
/// without history imposes no constraint. A malformed hierarchy has no
/// ancestors, making this a no-op.
///
/// Must not be called for the root table of a hierarchy; for a root the
/// ancestor walk is empty anyway.
pub async fn prune_orphans<D: Database>(
  db: &D,
  registry: &ClassRegistry,
  table: &VersionedTable,
) -> Result<PruneOutcome> {
  let versions = table.versions_table();
  let quoted = quote_ident(&versions);
  let delete = format!("DELETE FROM {quoted} WHERE \"ID\" = ?1");

  let chain = registry.ancestor_chain(&table.class);
  let mut outcome = PruneOutcome::default();

  let parents = chain
    .iter()
    .take_while(|c| **c != table.class)
    .flat_map(|ancestor| {
      let side = (!table.is_primary()).then(|| table.sibling_for(ancestor));
      std::iter::once(VersionedTable::primary(ancestor.clone())).chain(side)
    })
    .map(|parent| parent.versions_table());

  for parent in parents {
    let exists = db
      .table_exists(&parent)
      .await
      .map_err(SweepError::database(versions.as_str()))?;
    if !exists {
      tracing::debug!(table = %versions, ancestor = %parent, "ancestor has no history table");
      continue;
    }
    outcome.ancestors_checked += 1;

    let find = format!(
      "SELECT t.\"ID\" FROM {quoted} AS t \
       LEFT JOIN {} AS p ON p.\"RecordID\" = t.\"RecordID\" AND p.\"Version\" = t.\"Version\" \
       WHERE p.\"RecordID\" IS NULL \
       ORDER BY t.\"ID\"",
      quote_ident(&parent),
    );
    let rows = db
      .query(&find, Vec::new())
      .await
      .map_err(SweepError::database(versions.as_str()))?;

    let ids = rows
      .iter()
      .map(|row| {
        row.first().and_then(SqlValue::as_i64).ok_or_else(|| {
          SweepError::MalformedRow {
            table:  versions.clone(),
            detail: format!("expected an integer ID, got {row:?}"),
          }
        })
      })
      .collect::<Result<Vec<_>>>()?;

    if ids.is_empty() {
      continue;
    }

    let mut deleted = 0;
    for id in ids {
      deleted += db
        .execute(&delete, vec![SqlValue::Integer(id)])
        .await
        .map_err(SweepError::database(versions.as_str()))?;
    }

    tracing::info!("Removed {deleted} orphaned rows from {versions} with no match in {parent}");
    outcome.rows_deleted += deleted;
  }

  Ok(outcome)
}
