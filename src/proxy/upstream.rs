//! The fixed upstream origin and the client used to reach it.
//!
//! # Responsibilities
//! - Hold the configured scheme + host and the matching `Host` header value
//! - Derive the upstream URI from an inbound path and query
//! - Build the upstream HTTP client (TLS, no redirects, optional connect timeout)

use std::time::Duration;

use axum::body::Body;
use axum::http::uri::{Authority, PathAndQuery, Scheme};
use axum::http::{HeaderValue, Uri};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tower_http::decompression::Decompression;

use crate::config::{TimeoutConfig, UpstreamConfig};
use crate::proxy::error::ForwardError;

/// Upstream client: hyper's pooled client over rustls, with response
/// bodies decoded according to their `Content-Encoding`.
pub type UpstreamClient = Decompression<Client<HttpsConnector<HttpConnector>, Body>>;

/// The single origin every request is forwarded to.
#[derive(Debug, Clone)]
pub struct UpstreamOrigin {
    scheme: Scheme,
    authority: Authority,
    host_header: HeaderValue,
}

impl UpstreamOrigin {
    pub fn new(scheme: &str, host: &str) -> Result<Self, ForwardError> {
        let invalid = || ForwardError::InvalidOrigin(format!("{}://{}", scheme, host));
        let scheme: Scheme = scheme.parse().map_err(|_| invalid())?;
        let authority: Authority = host.parse().map_err(|_| invalid())?;
        let host_header = HeaderValue::from_str(host)
            .map_err(|_| ForwardError::InvalidHostHeader(host.to_string()))?;

        Ok(Self {
            scheme,
            authority,
            host_header,
        })
    }

    pub fn from_config(config: &UpstreamConfig) -> Result<Self, ForwardError> {
        Self::new(&config.scheme, &config.host)
    }

    /// Base URL of the origin, e.g. `https://origin.example.com`.
    pub fn base(&self) -> String {
        format!("{}://{}", self.scheme, self.authority)
    }

    /// Value written into the outbound `Host` header.
    pub fn host_header(&self) -> &HeaderValue {
        &self.host_header
    }

    /// Upstream URI for an inbound URI: the fixed scheme and authority with
    /// the inbound path and query exactly as received. Dot segments and
    /// escapes are left alone. Any scheme or authority on the inbound URI
    /// (absolute-form requests) is ignored.
    pub fn uri_for(&self, uri: &Uri) -> Result<Uri, ForwardError> {
        let mut parts = uri.clone().into_parts();
        parts.scheme = Some(self.scheme.clone());
        parts.authority = Some(self.authority.clone());
        if parts.path_and_query.is_none() {
            parts.path_and_query = Some(PathAndQuery::from_static("/"));
        }
        Ok(Uri::from_parts(parts)?)
    }
}

/// Build the upstream client.
///
/// The client never follows redirects: a 3xx belongs to the original
/// caller. Both `https` and plain `http` origins are reachable. The connect
/// timeout is only applied when configured; the overall request timeout is
/// enforced by the forwarder.
pub fn build_client(timeouts: &TimeoutConfig) -> Result<UpstreamClient, ForwardError> {
    let mut http = HttpConnector::new();
    http.enforce_http(false);
    if let Some(secs) = timeouts.connect_secs {
        http.set_connect_timeout(Some(Duration::from_secs(secs)));
    }

    let https = HttpsConnectorBuilder::new()
        .with_provider_and_webpki_roots(rustls::crypto::ring::default_provider())
        .map_err(ForwardError::Tls)?
        .https_or_http()
        .enable_http1()
        .wrap_connector(http);

    let client = Client::builder(TokioExecutor::new()).build(https);
    Ok(Decompression::new(client))
}
