//! The sweep driver.

use chrono::Utc;
use vrepair_core::{db::Database, registry::ClassRegistry};

use crate::{
  Result, SweepError,
  collapse::collapse_duplicates,
  enumerate::list_versioned_tables,
  prune::prune_orphans,
  report::{SweepReport, TableReport},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct SweepOptions {
  /// Run every statement, then roll the maintenance scope back.
  pub dry_run: bool,
}

/// Repair every versioned table of every class in `registry`.
///
/// Classes are processed in registry order, tables in enumerator order. The
/// whole pass runs inside one maintenance scope: it is committed on success
/// (or rolled back for a dry run) and rolled back on the first error, which
/// is then returned. Nothing is retried.
pub async fn run_sweep<D: Database>(
  db: &D,
  registry: &ClassRegistry,
  options: SweepOptions,
) -> Result<SweepReport> {
  let started_at = Utc::now();
  tracing::info!("Starting Purge");

  db.begin_maintenance()
    .await
    .map_err(SweepError::database("maintenance scope"))?;

  let tables = match sweep_all(db, registry).await {
    Ok(tables) => tables,
    Err(e) => {
      abandon_scope(db).await;
      return Err(e);
    }
  };

  if options.dry_run {
    db.rollback_maintenance()
      .await
      .map_err(SweepError::database("maintenance scope"))?;
  } else if let Err(e) = db.commit_maintenance().await {
    // A failed COMMIT can leave the transaction open on the connection.
    abandon_scope(db).await;
    return Err(SweepError::database("maintenance scope")(e));
  }

  let report = SweepReport {
    started_at,
    finished_at: Utc::now(),
    dry_run: options.dry_run,
    tables,
  };

  if options.dry_run {
    tracing::info!(
      rows = report.rows_removed(),
      "Dry run complete; all deletions rolled back"
    );
  }
  tracing::info!("Finished Successfully");

  Ok(report)
}

/// Best-effort rollback after a failure; the original error is what the
/// caller sees.
async fn abandon_scope<D: Database>(db: &D) {
  if let Err(rollback) = db.rollback_maintenance().await {
    tracing::error!(error = %rollback, "failed to roll back maintenance scope");
  }
}

async fn sweep_all<D: Database>(
  db: &D,
  registry: &ClassRegistry,
) -> Result<Vec<TableReport>> {
  let mut reports = Vec::new();

  for class in registry.all_class_ids() {
    let is_root = registry.is_root(class);

    for table in list_versioned_tables(db, registry, class).await? {
      tracing::info!("Purging {table}");

      let collapsed = collapse_duplicates(db, &table).await?;
      let pruned = if is_root {
        None
      } else {
        Some(prune_orphans(db, registry, &table).await?)
      };

      reports.push(TableReport {
        class:              class.clone(),
        table:              table.versions_table(),
        duplicate_groups:   collapsed.groups,
        duplicates_removed: collapsed.rows_deleted,
        orphans_removed:    pruned.map_or(0, |p| p.rows_deleted),
        pruned:             pruned.is_some(),
      });
    }
  }

  Ok(reports)
}
