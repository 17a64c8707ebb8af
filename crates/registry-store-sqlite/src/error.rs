//! Error type for `registry-store-sqlite`.

use rusqlite::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(tokio_rusqlite::Error),

  /// A UNIQUE, FOREIGN KEY, NOT NULL or CHECK constraint rejected a write.
  #[error("constraint violation: {0}")]
  ConstraintViolation(String),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// An update or targeted write addressed a key with no row.
  #[error("{entity} not found: {id}")]
  NotFound { entity: &'static str, id: i64 },
}

impl From<tokio_rusqlite::Error> for Error {
  fn from(e: tokio_rusqlite::Error) -> Self {
    match e {
      tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(err, msg))
        if err.code == ErrorCode::ConstraintViolation =>
      {
        Error::ConstraintViolation(msg.unwrap_or_else(|| err.to_string()))
      }
      other => Error::Database(other),
    }
  }
}

impl From<Error> for registry_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::NotFound { entity, id } => Self::NotFound { entity, id },
      Error::ConstraintViolation(msg) => Self::ConstraintViolation(msg),
      other => Self::Store(Box::new(other)),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
