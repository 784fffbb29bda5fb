//! Handler for `GET /people/{login}`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::HeaderMap,
};
use staffdir_core::{
  response::DirectoryResponse, service::Directory, store::DirectoryStore,
};

use crate::{error::ApiError, origin::origin_from_headers};

/// `GET /people/{login}` — detail lookup.
///
/// The body is a sequence of length zero (encoded `null`) or one, in the
/// same envelope as the list endpoints; an unknown login is not a 404.
pub async fn handler<S>(
  State(directory): State<Arc<Directory<S>>>,
  headers: HeaderMap,
  Path(login): Path<String>,
) -> Result<Json<DirectoryResponse>, ApiError>
where
  S: DirectoryStore,
{
  let origin = origin_from_headers(&headers);
  let response = directory.get_by_login(&login, origin).await?;
  Ok(Json(response))
}
