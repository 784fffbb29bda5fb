//! Core types and the query/filter/projection engine for the staff
//! directory service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod error;
pub mod projection;
pub mod query;
pub mod record;
pub mod response;
pub mod service;
pub mod store;
pub mod visibility;

pub use error::{Error, Result};
