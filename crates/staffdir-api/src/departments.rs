//! Department listing handlers.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/departments/{code}` | 400 unless `code` is numeric |
//! | `GET`  | `/category?department=..&job_category=..` | Department + category listing |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use serde::Deserialize;
use staffdir_core::{
  query::DepartmentCode, response::DirectoryResponse, service::Directory,
  store::DirectoryStore,
};

use crate::error::ApiError;

// ─── By department code ──────────────────────────────────────────────────────

/// `GET /departments/{code}` — validates the numeric shape before the core
/// is invoked; non-numeric input never reaches the query builder.
pub async fn by_code<S>(
  State(directory): State<Arc<Directory<S>>>,
  Path(code): Path<String>,
) -> Result<Json<DirectoryResponse>, ApiError>
where
  S: DirectoryStore,
{
  let code = DepartmentCode::parse(&code)?;
  let response = directory.list_by_department_code(&code).await?;
  Ok(Json(response))
}

// ─── By department and category ──────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct CategoryParams {
  #[serde(default)]
  pub department:   String,
  #[serde(default)]
  pub job_category: String,
}

/// `GET /category?department=...&job_category=...`
pub async fn by_category<S>(
  State(directory): State<Arc<Directory<S>>>,
  Query(params): Query<CategoryParams>,
) -> Result<Json<DirectoryResponse>, ApiError>
where
  S: DirectoryStore,
{
  let response = directory
    .list_by_department_and_category(&params.department, &params.job_category)
    .await?;
  Ok(Json(response))
}
