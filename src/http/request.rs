//! Per-request tracing context.
//!
//! Each inbound request gets a fresh UUID v4 recorded on its span. The id
//! lives in logs only; it is never added to the forwarded headers.

use axum::{body::Body, http::Request};
use tracing::Span;
use uuid::Uuid;

/// A request correlation id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Span factory for `TraceLayer`.
pub fn make_request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        request_id = %RequestId::new(),
        method = %request.method(),
        uri = %request.uri(),
        version = ?request.version()
    )
}
