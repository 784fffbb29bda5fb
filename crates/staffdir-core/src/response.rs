//! Response encoding.
//!
//! Every operation returns the same envelope: a JSON array of projected
//! records, or the literal `null` when nothing matched. The null marker is
//! the one no-results encoding, applied consistently — an endpoint never
//! returns an empty array. Single-record lookup is an array of length one,
//! never a bare object, so consumers decode all endpoints uniformly.

use serde::{Deserialize, Serialize};

use crate::{Result, projection::ProjectedRecord};

/// The serialised result of a directory operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DirectoryResponse(Option<Vec<ProjectedRecord>>);

impl DirectoryResponse {
  /// Wrap a projected result set; an empty set becomes the distinguished
  /// no-results marker.
  pub fn from_records(records: Vec<ProjectedRecord>) -> Self {
    if records.is_empty() { Self(None) } else { Self(Some(records)) }
  }

  pub fn no_results() -> Self {
    Self(None)
  }

  pub fn is_no_results(&self) -> bool {
    self.0.is_none()
  }

  /// The projected records, empty when this is the no-results marker.
  pub fn records(&self) -> &[ProjectedRecord] {
    self.0.as_deref().unwrap_or(&[])
  }

  /// Encode to the wire payload.
  pub fn to_json(&self) -> Result<String> {
    Ok(serde_json::to_string(self)?)
  }
}
