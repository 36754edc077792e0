//! Data-record classes and the side tables extensions contribute to them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a data-record class. The class name doubles as the name of
/// its primary table.
#[derive(
  Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ClassId(String);

impl ClassId {
  pub fn new(name: impl Into<String>) -> Self { Self(name.into()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for ClassId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for ClassId {
  fn from(s: &str) -> Self { Self(s.to_owned()) }
}

impl From<String> for ClassId {
  fn from(s: String) -> Self { Self(s) }
}

/// The known extensions that contribute side tables to a class.
///
/// This is a closed set: configuration naming any other provider is rejected
/// at deserialisation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuffixProvider {
  /// Per-language copies of a class's fields.
  Translatable,
  /// Locale-specific field overrides stored in `<Table>_Localised`.
  Fluent,
}

impl SuffixProvider {
  pub fn name(self) -> &'static str {
    match self {
      SuffixProvider::Translatable => "translatable",
      SuffixProvider::Fluent => "fluent",
    }
  }
}

impl fmt::Display for SuffixProvider {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// A side table declared by an extension: `<Class>_<suffix>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideTable {
  pub provider: SuffixProvider,
  pub suffix:   String,
}

/// Static declaration of one data-record class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDef {
  pub name:        ClassId,
  /// The class this one inherits its table layout from; `None` for a
  /// hierarchy root.
  #[serde(default)]
  pub parent:      Option<ClassId>,
  #[serde(default)]
  pub side_tables: Vec<SideTable>,
}

impl ClassDef {
  pub fn root(name: impl Into<ClassId>) -> Self {
    Self { name: name.into(), parent: None, side_tables: Vec::new() }
  }

  pub fn child(name: impl Into<ClassId>, parent: impl Into<ClassId>) -> Self {
    Self {
      name:        name.into(),
      parent:      Some(parent.into()),
      side_tables: Vec::new(),
    }
  }

  /// Builder-style helper to attach a side table declaration.
  pub fn with_side_table(
    mut self,
    provider: SuffixProvider,
    suffix: impl Into<String>,
  ) -> Self {
    self.side_tables.push(SideTable { provider, suffix: suffix.into() });
    self
  }
}
