//! Forwarding failures.
//!
//! Every variant is the same failure to the caller: a 502 with the fixed
//! JSON body. The variants only exist for logs.

use std::time::Duration;

use axum::http::uri::InvalidUriParts;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::http::response::proxy_error_response;

#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("invalid upstream origin {0:?}")]
    InvalidOrigin(String),

    #[error("invalid upstream host header value: {0:?}")]
    InvalidHostHeader(String),

    #[error("invalid upstream URI: {0}")]
    InvalidUri(#[from] InvalidUriParts),

    #[error("failed to configure TLS for the upstream client")]
    Tls(#[source] rustls::Error),

    #[error("upstream did not respond within {0:?}")]
    Timeout(Duration),

    #[error("upstream request failed")]
    Upstream(#[from] hyper_util::client::legacy::Error),
}

impl ForwardError {
    /// Human-readable description including the source chain, e.g.
    /// `upstream request failed: client error (Connect): tcp connect error: ...`.
    pub fn message(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            let text = err.to_string();
            if !text.is_empty() && !message.ends_with(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = err.source();
        }
        if message.is_empty() {
            message.push_str("upstream request failed");
        }
        message
    }

    /// True when the upstream call ran out of its configured time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ForwardError::Timeout(_))
    }
}

impl IntoResponse for ForwardError {
    fn into_response(self) -> Response {
        proxy_error_response(&self.message())
    }
}
