//! Core types and trait definitions for the versioned-table repair sweep.
//!
//! This crate is deliberately free of database dependencies. It describes the
//! class hierarchy, the tables that carry version history, and the
//! [`Database`](db::Database) seam that storage backends implement.

pub mod class;
pub mod db;
pub mod error;
pub mod registry;
pub mod table;

pub use error::{Error, Result};
