//! The `DirectoryStore` trait — the read-only repository abstraction.
//!
//! Implemented by storage backends (e.g. `staffdir-store-sqlite`). The core
//! never writes: records and name metadata are maintained by the external
//! administrative workflow.
//!
//! All methods return `Send` futures so the trait can be used in
//! multi-threaded async runtimes (e.g. tokio with `axum`).

use std::future::Future;

use uuid::Uuid;

use crate::{
  query::DirectoryQuery,
  record::{NameMeta, PersonRecord},
};

/// Abstraction over the directory's record repository.
pub trait DirectoryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Return every record matching `query`, in no guaranteed order.
  ///
  /// No result limit is applied; all matches are candidates. Ordering and
  /// visibility are the service pipeline's concern, since the sort key
  /// lives in the side metadata store.
  fn find<'a>(
    &'a self,
    query: &'a DirectoryQuery,
  ) -> impl Future<Output = Result<Vec<PersonRecord>, Self::Error>> + Send + 'a;

  /// Look up the first/last name pair for a record id in the side metadata
  /// store. `None` signals a data-integrity gap the caller handles per
  /// record.
  fn name_meta(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<NameMeta>, Self::Error>> + Send + '_;
}
