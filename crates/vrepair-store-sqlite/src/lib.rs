//! SQLite backend for the versioned-table repair sweep.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime.

mod encode;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteDatabase;

#[cfg(test)]
mod tests;
