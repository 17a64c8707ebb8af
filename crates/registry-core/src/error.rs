//! Error types for `registry-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The keyed row does not exist.
  #[error("{entity} not found: {id}")]
  NotFound { entity: &'static str, id: i64 },

  /// Duplicate unique field, dangling reference, or failed column check.
  #[error("constraint violation: {0}")]
  ConstraintViolation(String),

  /// Malformed input rejected before reaching the store.
  #[error("validation error: {0}")]
  Validation(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn not_found(entity: &'static str, id: impl Into<i64>) -> Self {
    Self::NotFound { entity, id: id.into() }
  }

  pub fn is_not_found(&self) -> bool { matches!(self, Self::NotFound { .. }) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
