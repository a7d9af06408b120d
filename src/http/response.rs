//! Synthetic responses produced by the relay itself.
//!
//! The only one is the 502 returned when no upstream response could be
//! obtained:
//!
//! ```text
//! HTTP/1.1 502 Bad Gateway
//! Content-Type: application/json
//!
//! {"error":"Proxy error","message":"<failure description>"}
//! ```

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

pub const PROXY_ERROR: &str = "Proxy error";

/// Field order is part of the wire format.
#[derive(Debug, Serialize)]
struct ProxyErrorBody<'a> {
    error: &'static str,
    message: &'a str,
}

/// Encode the 502 body for `message`.
pub fn proxy_error_body(message: &str) -> Vec<u8> {
    let body = ProxyErrorBody {
        error: PROXY_ERROR,
        message,
    };
    serde_json::to_vec(&body)
        .unwrap_or_else(|_| br#"{"error":"Proxy error","message":"unencodable error"}"#.to_vec())
}

/// The 502 response for a failed forward.
pub fn proxy_error_response(message: &str) -> Response {
    (
        StatusCode::BAD_GATEWAY,
        [(header::CONTENT_TYPE, "application/json")],
        proxy_error_body(message),
    )
        .into_response()
}
