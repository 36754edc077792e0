//! [`ClassRegistry`]: the static class metadata the sweep walks.
//!
//! Built once at startup from configuration. Answers the questions the sweep
//! needs about the table-inheritance hierarchy: which classes exist, what a
//! class's ancestors are, and which side tables extensions contribute.

use std::collections::{HashMap, HashSet};

use crate::{
  Error, Result,
  class::{ClassDef, ClassId, SuffixProvider},
};

#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
  classes: Vec<ClassDef>,
  index:   HashMap<ClassId, usize>,
}

impl ClassRegistry {
  /// Build a registry, preserving declaration order.
  pub fn new(classes: Vec<ClassDef>) -> Result<Self> {
    let mut index = HashMap::with_capacity(classes.len());
    for (i, def) in classes.iter().enumerate() {
      if def.name.as_str().is_empty() {
        return Err(Error::EmptyClassName);
      }
      if index.insert(def.name.clone(), i).is_some() {
        return Err(Error::DuplicateClass(def.name.clone()));
      }
    }
    Ok(Self { classes, index })
  }

  pub fn get(&self, class: &ClassId) -> Option<&ClassDef> {
    self.index.get(class).map(|&i| &self.classes[i])
  }

  /// Every registered data class, in declaration order.
  pub fn all_class_ids(&self) -> impl Iterator<Item = &ClassId> + '_ {
    self.classes.iter().map(|c| &c.name)
  }

  /// Root-first ancestry of `class`, ending with `class` itself.
  ///
  /// An unknown class, a parent that is not registered, or a parent cycle
  /// all yield an empty chain.
  pub fn ancestor_chain(&self, class: &ClassId) -> Vec<ClassId> {
    let mut chain = Vec::new();
    let mut seen = HashSet::new();
    let mut cursor = Some(class);

    while let Some(name) = cursor {
      let Some(def) = self.get(name) else {
        tracing::warn!(%class, missing = %name, "class hierarchy references an unknown class");
        return Vec::new();
      };
      if !seen.insert(name) {
        tracing::warn!(%class, "class hierarchy contains a cycle");
        return Vec::new();
      }
      chain.push(def.name.clone());
      cursor = def.parent.as_ref();
    }

    chain.reverse();
    chain
  }

  /// The root of `class`'s hierarchy, or `None` if the hierarchy is malformed.
  pub fn base_class_of(&self, class: &ClassId) -> Option<ClassId> {
    self.ancestor_chain(class).into_iter().next()
  }

  /// Whether `class` is the root of its own hierarchy.
  pub fn is_root(&self, class: &ClassId) -> bool {
    self.get(class).is_some_and(|def| def.parent.is_none())
  }

  /// Side-table suffixes applicable to `class` with the provider owning each.
  ///
  /// Extensions applied to an ancestor apply to its subclasses too, so the
  /// declarations of every ancestor are included, ancestors first. Entries
  /// are returned as declared; callers deduplicate.
  pub fn extension_suffixes(
    &self,
    class: &ClassId,
  ) -> Vec<(String, SuffixProvider)> {
    let chain = self.ancestor_chain(class);
    let lineage: Vec<&ClassId> = if chain.is_empty() {
      // Still honour the class's own declarations when its ancestry is broken.
      self.get(class).map(|def| vec![&def.name]).unwrap_or_default()
    } else {
      chain.iter().collect()
    };

    lineage
      .into_iter()
      .filter_map(|name| self.get(name))
      .flat_map(|def| def.side_tables.iter())
      .map(|side| (side.suffix.clone(), side.provider))
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn site_tree() -> ClassRegistry {
    ClassRegistry::new(vec![
      ClassDef::root("SiteTree")
        .with_side_table(SuffixProvider::Fluent, "Localised"),
      ClassDef::child("Page", "SiteTree"),
      ClassDef::child("RedirectorPage", "Page")
        .with_side_table(SuffixProvider::Translatable, "lang"),
    ])
    .unwrap()
  }

  #[test]
  fn all_class_ids_keeps_declaration_order() {
    let reg = site_tree();
    let ids: Vec<_> = reg.all_class_ids().map(ClassId::as_str).collect();
    assert_eq!(ids, ["SiteTree", "Page", "RedirectorPage"]);
  }

  #[test]
  fn ancestor_chain_is_root_first() {
    let reg = site_tree();
    let chain = reg.ancestor_chain(&"RedirectorPage".into());
    let names: Vec<_> = chain.iter().map(ClassId::as_str).collect();
    assert_eq!(names, ["SiteTree", "Page", "RedirectorPage"]);
    assert_eq!(
      reg.base_class_of(&"RedirectorPage".into()),
      Some("SiteTree".into())
    );
  }

  #[test]
  fn root_detection() {
    let reg = site_tree();
    assert!(reg.is_root(&"SiteTree".into()));
    assert!(!reg.is_root(&"Page".into()));
    assert!(!reg.is_root(&"Unknown".into()));
  }

  #[test]
  fn side_tables_are_inherited() {
    let reg = site_tree();
    let suffixes = reg.extension_suffixes(&"RedirectorPage".into());
    assert_eq!(
      suffixes,
      vec![
        ("Localised".to_owned(), SuffixProvider::Fluent),
        ("lang".to_owned(), SuffixProvider::Translatable),
      ]
    );
    assert!(reg.extension_suffixes(&"Unknown".into()).is_empty());
  }

  #[test]
  fn unknown_parent_yields_empty_chain() {
    let reg =
      ClassRegistry::new(vec![ClassDef::child("Orphaned", "Missing")]).unwrap();
    assert!(reg.ancestor_chain(&"Orphaned".into()).is_empty());
    assert_eq!(reg.base_class_of(&"Orphaned".into()), None);
  }

  #[test]
  fn parent_cycle_yields_empty_chain() {
    let reg = ClassRegistry::new(vec![
      ClassDef::child("A", "B"),
      ClassDef::child("B", "A"),
    ])
    .unwrap();
    assert!(reg.ancestor_chain(&"A".into()).is_empty());
  }

  #[test]
  fn duplicate_class_is_rejected() {
    let err = ClassRegistry::new(vec![
      ClassDef::root("SiteTree"),
      ClassDef::root("SiteTree"),
    ])
    .unwrap_err();
    assert!(matches!(err, Error::DuplicateClass(c) if c.as_str() == "SiteTree"));
  }

  #[test]
  fn empty_class_name_is_rejected() {
    let err = ClassRegistry::new(vec![ClassDef::root("")]).unwrap_err();
    assert!(matches!(err, Error::EmptyClassName));
  }
}
