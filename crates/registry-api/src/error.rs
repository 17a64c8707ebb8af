//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn not_found(entity: &str, key: impl std::fmt::Display) -> Self {
    Self::NotFound(format!("{entity} {key} not found"))
  }
}

impl From<registry_core::Error> for ApiError {
  fn from(e: registry_core::Error) -> Self {
    use registry_core::Error as E;
    match e {
      E::NotFound { .. } => Self::NotFound(e.to_string()),
      E::ConstraintViolation(m) => Self::Conflict(m),
      E::Validation(m) => Self::BadRequest(m),
      E::Store(inner) => Self::Store(inner),
    }
  }
}

impl From<PathRejection> for ApiError {
  fn from(r: PathRejection) -> Self { Self::BadRequest(r.body_text()) }
}

impl From<QueryRejection> for ApiError {
  fn from(r: QueryRejection) -> Self { Self::BadRequest(r.body_text()) }
}

impl From<JsonRejection> for ApiError {
  fn from(r: JsonRejection) -> Self { Self::BadRequest(r.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
