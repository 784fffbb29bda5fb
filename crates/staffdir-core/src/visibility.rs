//! Display-time visibility rules.
//!
//! The privacy flag is checked here, once per candidate, after retrieval
//! and before projection. It is deliberately not folded into the repository
//! predicate: keeping it a separate stage makes the rule auditable and
//! testable independently of query construction.

use serde::{Deserialize, Serialize};

use crate::record::PersonRecord;

/// Whether a record may appear in any directory output.
pub fn is_visible(record: &PersonRecord) -> bool {
  !record.privacy_flag
}

/// Network origin of a request, as classified by the edge proxy.
///
/// Passed explicitly into the operations that receive the origin header.
/// The core never reads it from ambient state. Both origins currently
/// select identical projections; the enum is the seam where origin-based
/// field redaction would plug in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
  /// Request arrived from inside the trusted network perimeter (the
  /// classification header was absent).
  Trusted,
  /// Request arrived from outside the perimeter.
  External,
}
