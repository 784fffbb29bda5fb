//! JSON REST API for the staff directory.
//!
//! Exposes an axum [`Router`] backed by any
//! [`staffdir_core::store::DirectoryStore`]. Transport sanitisation, TLS,
//! and deployment concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/directory/v1", staffdir_api::api_router(directory.clone()))
//! ```

pub mod departments;
pub mod error;
pub mod origin;
pub mod people;
pub mod search;

use std::sync::Arc;

use axum::{Router, routing::get};
use staffdir_core::{service::Directory, store::DirectoryStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `directory`.
///
/// The returned `Router<()>` can be nested into any parent router
/// regardless of its own state type.
pub fn api_router<S>(directory: Arc<Directory<S>>) -> Router<()>
where
  S: DirectoryStore + 'static,
{
  Router::new()
    .route("/search", get(search::handler::<S>))
    .route("/people/{login}", get(people::handler::<S>))
    .route("/departments/{code}", get(departments::by_code::<S>))
    .route("/category", get(departments::by_category::<S>))
    .with_state(directory)
}
