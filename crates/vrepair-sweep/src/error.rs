//! Error type for `vrepair-sweep`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SweepError {
  #[error(
    "permission denied: the repair task must be run from the command line or \
     by an administrator"
  )]
  PermissionDenied,

  /// A query or statement failed; `context` names the class or table being
  /// processed at the time.
  #[error("database error while processing {context}: {source}")]
  Database {
    context: String,
    #[source]
    source:  Box<dyn std::error::Error + Send + Sync>,
  },

  #[error("unexpected row shape from {table}: {detail}")]
  MalformedRow { table: String, detail: String },
}

impl SweepError {
  /// Adapter for `map_err` that tags a backend error with what was being
  /// processed.
  pub(crate) fn database<E>(context: impl Into<String>) -> impl FnOnce(E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    let context = context.into();
    move |e| SweepError::Database { context, source: Box::new(e) }
  }
}

pub type Result<T, E = SweepError> = std::result::Result<T, E>;
