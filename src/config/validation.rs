//! Configuration validation.
//!
//! Serde handles syntax; this pass checks values the relay cannot start
//! with. All problems are collected, not just the first.

use std::net::SocketAddr;

use crate::config::schema::RelayConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingUpstreamHost,
    InvalidUpstreamHost(String),
    UnsupportedScheme(String),
    InvalidBindAddress(String),
    InvalidMetricsAddress(String),
    ZeroTimeout(&'static str),
    InvalidStrippedHeader(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MissingUpstreamHost => write!(f, "upstream.host is required"),
            ValidationError::InvalidUpstreamHost(host) => {
                write!(f, "upstream.host must be a bare host[:port], got {:?}", host)
            }
            ValidationError::UnsupportedScheme(scheme) => {
                write!(f, "upstream.scheme must be \"https\" or \"http\", got {:?}", scheme)
            }
            ValidationError::InvalidBindAddress(addr) => {
                write!(f, "listener.bind_address must be host:port, got {:?}", addr)
            }
            ValidationError::InvalidMetricsAddress(addr) => {
                write!(f, "observability.metrics_address is not a socket address: {:?}", addr)
            }
            ValidationError::ZeroTimeout(field) => write!(f, "{} must be greater than zero", field),
            ValidationError::InvalidStrippedHeader(name) => {
                write!(f, "upstream.strip_request_headers contains an invalid header name: {:?}", name)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a configuration, returning every problem found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let host = config.upstream.host.as_str();
    if host.is_empty() {
        errors.push(ValidationError::MissingUpstreamHost);
    } else if !is_bare_authority(host) {
        errors.push(ValidationError::InvalidUpstreamHost(host.to_string()));
    }

    if !matches!(config.upstream.scheme.as_str(), "https" | "http") {
        errors.push(ValidationError::UnsupportedScheme(config.upstream.scheme.clone()));
    }

    for name in &config.upstream.strip_request_headers {
        if axum::http::HeaderName::from_bytes(name.as_bytes()).is_err() {
            errors.push(ValidationError::InvalidStrippedHeader(name.clone()));
        }
    }

    if !is_bind_address(&config.listener.bind_address) {
        errors.push(ValidationError::InvalidBindAddress(config.listener.bind_address.clone()));
    }

    if config.timeouts.connect_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout("timeouts.connect_secs"));
    }
    if config.timeouts.request_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout("timeouts.request_secs"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// A host with an optional port and nothing else: no scheme, path, query,
/// userinfo or whitespace.
fn is_bare_authority(host: &str) -> bool {
    !host.contains("://")
        && !host.contains(['/', '?', '#', '@'])
        && !host.chars().any(char::is_whitespace)
        && host.parse::<axum::http::uri::Authority>().is_ok()
}

/// Something `TcpListener::bind` can take: an IP socket address or a
/// hostname with a port. Name resolution is left to bind time.
fn is_bind_address(addr: &str) -> bool {
    addr.parse::<SocketAddr>().is_ok()
        || (is_bare_authority(addr)
            && addr
                .parse::<axum::http::uri::Authority>()
                .is_ok_and(|authority| authority.port_u16().is_some()))
}
