//! Header rewrite rules.
//!
//! Request side, in order:
//! 1. copy every inbound header (all values)
//! 2. overwrite `Host` with the upstream host
//! 3. drop the platform-injected headers
//!
//! Nothing else is added: no `Accept`, no `User-Agent`, no forwarding
//! headers. The one exception is `Accept-Encoding`. The decompression layer
//! of the upstream client sets it to `gzip,deflate,br,zstd` when the caller
//! sent none, and leaves a caller's value untouched.
//!
//! Response side: copy every upstream header, then drop `Content-Encoding`.
//! The upstream client hands us decoded bytes, so the original encoding
//! header would describe a body the caller never receives.

use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Method};

/// Whether a request with this method carries a body upstream.
/// GET and HEAD bodies are dropped, never rejected.
pub fn forwards_body(method: &Method) -> bool {
    method != Method::GET && method != Method::HEAD
}

/// Build the outbound header set from the inbound one.
///
/// When `with_body` is false the inbound framing headers are removed too,
/// since the body they describe is not sent.
pub fn rewrite_request_headers(
    inbound: &HeaderMap,
    host: &HeaderValue,
    stripped: &[HeaderName],
    with_body: bool,
) -> HeaderMap {
    let mut headers = inbound.clone();
    headers.insert(header::HOST, host.clone());

    for name in stripped {
        headers.remove(name);
    }

    if !with_body {
        headers.remove(header::CONTENT_LENGTH);
        headers.remove(header::TRANSFER_ENCODING);
    }

    headers
}

/// Build the relayed header set from the upstream one.
pub fn rewrite_response_headers(mut upstream: HeaderMap) -> HeaderMap {
    upstream.remove(header::CONTENT_ENCODING);
    upstream
}
