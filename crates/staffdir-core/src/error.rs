//! Error types for `staffdir-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Rejected before any query is built; route layers surface this as a
  /// validation failure.
  #[error("department code must be numeric, got {0:?}")]
  NonNumericDepartmentCode(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
