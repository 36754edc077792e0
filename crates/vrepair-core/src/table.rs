//! Physical tables that carry version history.

use std::fmt;

use serde::Serialize;

use crate::class::ClassId;

/// Suffix appended to a table name to get its history companion.
pub const VERSIONS_SUFFIX: &str = "_versions";

/// A table identified by the class it belongs to and a side-table suffix.
///
/// An empty suffix denotes the primary table of the class (named after the
/// class itself); a non-empty suffix denotes `<class>_<suffix>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct VersionedTable {
  pub class:  ClassId,
  pub suffix: String,
}

impl VersionedTable {
  pub fn new(class: impl Into<ClassId>, suffix: impl Into<String>) -> Self {
    Self { class: class.into(), suffix: suffix.into() }
  }

  pub fn primary(class: impl Into<ClassId>) -> Self { Self::new(class, "") }

  pub fn is_primary(&self) -> bool { self.suffix.is_empty() }

  /// The base table name, e.g. `Page` or `Page_Localised`.
  pub fn name(&self) -> String {
    if self.suffix.is_empty() {
      self.class.as_str().to_owned()
    } else {
      format!("{}_{}", self.class, self.suffix)
    }
  }

  /// The history companion, e.g. `Page_versions`.
  pub fn versions_table(&self) -> String {
    format!("{}{VERSIONS_SUFFIX}", self.name())
  }

  /// The table of the same family (same suffix) belonging to `class`.
  pub fn sibling_for(&self, class: &ClassId) -> Self {
    Self { class: class.clone(), suffix: self.suffix.clone() }
  }
}

impl fmt::Display for VersionedTable {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.name())
  }
}
