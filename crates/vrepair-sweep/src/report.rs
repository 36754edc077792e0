//! Summary of what a sweep removed.

use chrono::{DateTime, Utc};
use serde::Serialize;
use vrepair_core::class::ClassId;

/// Per-table result of one sweep pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableReport {
  pub class:              ClassId,
  /// The history table that was processed, e.g. `Page_versions`.
  pub table:              String,
  pub duplicate_groups:   usize,
  pub duplicates_removed: usize,
  pub orphans_removed:    usize,
  /// Whether the orphan pass ran (it never does for a hierarchy root).
  pub pruned:             bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
  pub started_at:  DateTime<Utc>,
  pub finished_at: DateTime<Utc>,
  /// When set, every deletion was rolled back.
  pub dry_run:     bool,
  pub tables:      Vec<TableReport>,
}

impl SweepReport {
  pub fn duplicates_removed(&self) -> usize {
    self.tables.iter().map(|t| t.duplicates_removed).sum()
  }

  pub fn orphans_removed(&self) -> usize {
    self.tables.iter().map(|t| t.orphans_removed).sum()
  }

  pub fn rows_removed(&self) -> usize {
    self.duplicates_removed() + self.orphans_removed()
  }
}
