//! Error types for `vrepair-core`.

use thiserror::Error;

use crate::class::ClassId;

#[derive(Debug, Error)]
pub enum Error {
  #[error("class {0} is declared more than once")]
  DuplicateClass(ClassId),

  #[error("class name must not be empty")]
  EmptyClassName,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
