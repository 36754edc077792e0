//! `vrepair` — repair duplicate and orphaned rows in versioned history tables.
//!
//! Reads `vrepair.toml` (or the path given with `--config`) for the database
//! location and the class hierarchy, then runs the sweep once inside a single
//! transaction.
//!
//! # Usage
//!
//! ```text
//! vrepair --config site.toml
//! vrepair --dry-run --json
//! ```

mod settings;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use vrepair_core::registry::ClassRegistry;
use vrepair_store_sqlite::SqliteDatabase;
use vrepair_sweep::{Invocation, SweepOptions, run_task};

#[derive(Parser)]
#[command(
  author,
  version,
  about = "Collapse duplicate and prune orphaned rows in *_versions tables"
)]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "vrepair.toml")]
  config: PathBuf,

  /// Override the database path from the configuration file.
  #[arg(long, value_name = "FILE")]
  database: Option<PathBuf>,

  /// Report what would be removed, then roll every deletion back.
  #[arg(long)]
  dry_run: bool,

  /// Print the sweep report as JSON on stdout.
  #[arg(long)]
  json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let cfg = settings::load(&cli.config)?;
  let registry =
    ClassRegistry::new(cfg.classes).context("invalid class hierarchy")?;

  let db_path = settings::expand_tilde(cli.database.as_ref().unwrap_or(&cfg.database_path));
  anyhow::ensure!(db_path.exists(), "database {db_path:?} does not exist");

  let db = SqliteDatabase::open(&db_path)
    .await
    .with_context(|| format!("failed to open database at {db_path:?}"))?;

  let report = run_task(&db, &registry, Invocation::Cli, SweepOptions {
    dry_run: cli.dry_run,
  })
  .await
  .context("purge failed")?;

  tracing::info!(
    tables = report.tables.len(),
    duplicates = report.duplicates_removed(),
    orphans = report.orphans_removed(),
    dry_run = report.dry_run,
    "sweep summary"
  );

  if cli.json {
    println!("{}", serde_json::to_string_pretty(&report)?);
  }

  Ok(())
}
