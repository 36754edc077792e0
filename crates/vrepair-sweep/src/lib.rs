//! The repair sweep over versioned tables.
//!
//! For every data class the sweep finds the tables carrying version history,
//! collapses duplicate `(RecordID, Version)` rows down to the one with the
//! lowest `ID`, and removes rows of non-root tables that have no counterpart
//! in an ancestor's history. Everything runs inside one maintenance scope on
//! the injected [`Database`](vrepair_core::db::Database).
//!
//! Running the sweep twice is always safe: a second pass deletes nothing.

mod collapse;
mod enumerate;
mod gate;
mod prune;
mod report;
mod sweep;

pub mod error;

pub use collapse::{CollapseOutcome, collapse_duplicates};
pub use enumerate::list_versioned_tables;
pub use error::{Result, SweepError};
pub use gate::{Invocation, authorize, run_task};
pub use prune::{PruneOutcome, prune_orphans};
pub use report::{SweepReport, TableReport};
pub use sweep::{SweepOptions, run_sweep};
