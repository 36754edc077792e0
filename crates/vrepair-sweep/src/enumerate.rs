//! Discovery of the tables that carry version history for a class.

use vrepair_core::{
  class::ClassId,
  db::Database,
  registry::ClassRegistry,
  table::VersionedTable,
};

use crate::{Result, SweepError};

/// List the tables of `class` that have a `_versions` companion.
///
/// The primary table always comes first, followed by extension side tables
/// in declaration order (ancestors' declarations before the class's own).
/// Extension suffixes are deduplicated among themselves only: an extension
/// that declares the empty suffix yields the primary table a second time,
/// which the sweep tolerates since every pass is idempotent.
pub async fn list_versioned_tables<D: Database>(
  db: &D,
  registry: &ClassRegistry,
  class: &ClassId,
) -> Result<Vec<VersionedTable>> {
  let mut declared: Vec<String> = Vec::new();
  for (suffix, provider) in registry.extension_suffixes(class) {
    if declared.contains(&suffix) {
      tracing::debug!(%class, %suffix, %provider, "suffix already declared");
      continue;
    }
    declared.push(suffix);
  }

  let candidates = std::iter::once(String::new()).chain(declared);

  let mut tables = Vec::new();
  for suffix in candidates {
    let table = VersionedTable::new(class.clone(), suffix);
    let versions = table.versions_table();
    let exists = db
      .table_exists(&versions)
      .await
      .map_err(SweepError::database(format!("class {class}")))?;

    if exists {
      tables.push(table);
    } else {
      tracing::debug!(table = %versions, "no history table; skipping");
    }
  }

  Ok(tables)
}
