//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
///
/// A no-match outcome is not an error — it is encoded as the `null`
/// response body by the core.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("directory error: {0}")]
  Internal(#[source] staffdir_core::Error),
}

impl From<staffdir_core::Error> for ApiError {
  fn from(e: staffdir_core::Error) -> Self {
    match e {
      staffdir_core::Error::NonNumericDepartmentCode(_) => {
        ApiError::BadRequest(e.to_string())
      }
      other => ApiError::Internal(other),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Internal(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
