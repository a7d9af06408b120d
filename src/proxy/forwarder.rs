//! The Forwarder: one inbound request in, one relayed response out.

use std::convert::Infallible;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    http::{HeaderName, Request},
    response::{IntoResponse, Response},
};
use futures_util::future::BoxFuture;
use tower::{Service, ServiceExt};

use crate::config::RelayConfig;
use crate::observability::metrics;
use crate::proxy::error::ForwardError;
use crate::proxy::headers::{forwards_body, rewrite_request_headers, rewrite_response_headers};
use crate::proxy::upstream::{build_client, UpstreamClient, UpstreamOrigin};

/// Forwards every request to the configured upstream origin.
///
/// Cheap to clone; all clones share one upstream client.
#[derive(Clone)]
pub struct Forwarder {
    inner: Arc<Inner>,
}

struct Inner {
    origin: UpstreamOrigin,
    stripped: Vec<HeaderName>,
    client: UpstreamClient,
    request_timeout: Option<Duration>,
}

impl Forwarder {
    /// Build a forwarder from a validated configuration.
    pub fn new(config: &RelayConfig) -> Result<Self, ForwardError> {
        let origin = UpstreamOrigin::from_config(&config.upstream)?;
        let client = build_client(&config.timeouts)?;
        let stripped = config
            .upstream
            .strip_request_headers
            .iter()
            .filter_map(|name| HeaderName::from_bytes(name.as_bytes()).ok())
            .collect();

        let request_timeout = config.timeouts.request_secs.map(Duration::from_secs);
        tracing::debug!(origin = %origin.base(), ?request_timeout, "Upstream client ready");

        Ok(Self {
            inner: Arc::new(Inner {
                origin,
                stripped,
                client,
                request_timeout,
            }),
        })
    }

    pub fn origin(&self) -> &UpstreamOrigin {
        &self.inner.origin
    }

    /// Forward `request` upstream and rebuild the response.
    ///
    /// `Ok` carries the relayed response (any upstream status, 3xx
    /// included); `Err` means no upstream response was obtained.
    pub async fn forward(&self, request: Request<Body>) -> Result<Response, ForwardError> {
        let (parts, body) = request.into_parts();
        let uri = self.inner.origin.uri_for(&parts.uri)?;
        let with_body = forwards_body(&parts.method);
        let headers = rewrite_request_headers(
            &parts.headers,
            self.inner.origin.host_header(),
            &self.inner.stripped,
            with_body,
        );

        tracing::debug!(
            method = %parts.method,
            upstream = %uri,
            with_body,
            "Forwarding request"
        );

        let body = if with_body { body } else { Body::empty() };
        let mut outbound = Request::new(body);
        *outbound.method_mut() = parts.method;
        *outbound.uri_mut() = uri;
        *outbound.headers_mut() = headers;

        let send = self.inner.client.clone().oneshot(outbound);
        let upstream = match self.inner.request_timeout {
            Some(limit) => tokio::time::timeout(limit, send)
                .await
                .map_err(|_| ForwardError::Timeout(limit))??,
            None => send.await?,
        };

        let (mut head, body) = upstream.into_parts();
        head.headers = rewrite_response_headers(std::mem::take(&mut head.headers));

        tracing::debug!(status = %head.status, "Upstream responded");

        Ok(Response::from_parts(head, Body::new(body)))
    }

    /// Forward `request`, turning any failure into the 502 JSON response.
    /// Always returns a response.
    pub async fn handle(&self, request: Request<Body>) -> Response {
        let start = Instant::now();
        let method = request.method().to_string();

        let response = match self.forward(request).await {
            Ok(response) => response,
            Err(e) => {
                let message = e.message();
                tracing::error!(error = %message, timeout = e.is_timeout(), "Proxy error");
                metrics::record_upstream_error();
                e.into_response()
            }
        };

        metrics::record_request(&method, response.status().as_u16(), start);
        response
    }
}

impl Service<Request<Body>> for Forwarder {
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let forwarder = self.clone();
        Box::pin(async move { Ok(forwarder.handle(request).await) })
    }
}
