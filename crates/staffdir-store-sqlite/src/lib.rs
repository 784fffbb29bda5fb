//! SQLite backend for the staff directory.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime. The query surface is
//! read-only; the `upsert_*` methods exist for the administrative sync
//! workflow (and tests) that populates the store.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
