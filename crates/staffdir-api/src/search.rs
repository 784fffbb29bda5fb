//! Handler for `GET /search`.
//!
//! Query params map directly to [`SearchRequest`] fields; an absent or
//! empty param places no constraint on that field.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
  http::HeaderMap,
};
use serde::Deserialize;
use staffdir_core::{
  response::DirectoryResponse,
  service::{Directory, SearchRequest},
  store::DirectoryStore,
};

use crate::{error::ApiError, origin::origin_from_headers};

#[derive(Debug, Deserialize, Default)]
pub struct SearchParams {
  #[serde(default)]
  pub term:         String,
  #[serde(default)]
  pub department:   String,
  #[serde(default)]
  pub job_title:    String,
  #[serde(default)]
  pub building:     String,
  #[serde(default)]
  pub mail_stop:    String,
  #[serde(default)]
  pub office_phone: String,
}

/// `GET /search[?term=...][&department=...][&job_title=...][&building=...][&mail_stop=...][&office_phone=...]`
pub async fn handler<S>(
  State(directory): State<Arc<Directory<S>>>,
  headers: HeaderMap,
  Query(params): Query<SearchParams>,
) -> Result<Json<DirectoryResponse>, ApiError>
where
  S: DirectoryStore,
{
  let origin = origin_from_headers(&headers);
  let request = SearchRequest {
    term:         params.term,
    department:   params.department,
    job_title:    params.job_title,
    building:     params.building,
    mail_stop:    params.mail_stop,
    office_phone: params.office_phone,
  };

  let response = directory.search(request, origin).await?;
  Ok(Json(response))
}
