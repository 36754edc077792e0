//! The permission check guarding the repair task.

use vrepair_core::{db::Database, registry::ClassRegistry};

use crate::{
  Result, SweepError,
  report::SweepReport,
  sweep::{SweepOptions, run_sweep},
};

/// How the repair task was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
  /// From a shell by an operator.
  Cli,
  /// From an authenticated session; only administrators may run the task.
  Session { admin: bool },
}

pub fn authorize(invocation: &Invocation) -> Result<()> {
  match invocation {
    Invocation::Cli | Invocation::Session { admin: true } => Ok(()),
    Invocation::Session { admin: false } => Err(SweepError::PermissionDenied),
  }
}

/// Check the caller may run the task, then run the sweep.
///
/// The check happens before the database is touched at all.
pub async fn run_task<D: Database>(
  db: &D,
  registry: &ClassRegistry,
  invocation: Invocation,
  options: SweepOptions,
) -> Result<SweepReport> {
  authorize(&invocation)?;
  run_sweep(db, registry, options).await
}
