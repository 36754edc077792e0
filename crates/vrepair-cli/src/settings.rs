//! Configuration file shape and loading.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;
use vrepair_core::class::ClassDef;

/// Runtime configuration, deserialised from `vrepair.toml` and `VREPAIR_*`
/// environment variables.
#[derive(Deserialize, Debug, Clone)]
pub struct RepairConfig {
  /// SQLite file holding the versioned tables.
  pub database_path: PathBuf,
  /// Every data class with its own table, in processing order.
  #[serde(default)]
  pub classes:       Vec<ClassDef>,
}

pub fn load(path: &Path) -> anyhow::Result<RepairConfig> {
  let settings = config::Config::builder()
    .add_source(config::File::from(path).required(false))
    .add_source(config::Environment::with_prefix("VREPAIR"))
    .build()
    .context("failed to read config file")?;

  settings
    .try_deserialize()
    .context("failed to deserialise RepairConfig")
}

/// Resolve a leading `~` component against `$HOME`. `~user` forms are left
/// untouched.
pub fn expand_tilde(path: &Path) -> PathBuf {
  match (path.strip_prefix("~"), std::env::var_os("HOME")) {
    (Ok(rest), Some(home)) => PathBuf::from(home).join(rest),
    _ => path.to_path_buf(),
  }
}
