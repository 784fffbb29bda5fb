//! Request-origin classification.
//!
//! The edge proxy stamps requests that cross the network perimeter with a
//! marker header. Its presence classifies the request as external; it is
//! mapped to [`Origin`] here and passed into the core explicitly — the core
//! never reads headers.

use axum::http::HeaderMap;
use staffdir_core::visibility::Origin;

/// Header set by the edge proxy on externally-originating requests. The
/// value is irrelevant; presence is the signal.
pub const ORIGIN_HEADER: &str = "x-external-network";

pub fn origin_from_headers(headers: &HeaderMap) -> Origin {
  if headers.contains_key(ORIGIN_HEADER) {
    Origin::External
  } else {
    Origin::Trusted
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn absent_header_is_trusted() {
    assert_eq!(origin_from_headers(&HeaderMap::new()), Origin::Trusted);
  }

  #[test]
  fn present_header_is_external_regardless_of_value() {
    let mut headers = HeaderMap::new();
    headers.insert(ORIGIN_HEADER, "1".parse().unwrap());
    assert_eq!(origin_from_headers(&headers), Origin::External);

    let mut headers = HeaderMap::new();
    headers.insert(ORIGIN_HEADER, "".parse().unwrap());
    assert_eq!(origin_from_headers(&headers), Origin::External);
  }
}
