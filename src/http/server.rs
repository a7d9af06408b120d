//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router sending every method and path to the Forwarder
//! - Wire up middleware (tracing span, panic guard)
//! - Serve on a listener until the shutdown broadcast fires

use std::any::Any;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::config::RelayConfig;
use crate::http::request::make_request_span;
use crate::http::response::proxy_error_response;
use crate::proxy::{ForwardError, Forwarder};

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Result<Self, ForwardError> {
        let forwarder = Forwarder::new(&config)?;
        let router = Self::build_router(forwarder);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(forwarder: Forwarder) -> Router {
        Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(forwarder)
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
    }

    /// The router, for mounting under another server or driving in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.host,
            scheme = %self.config.upstream.scheme,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

/// Every method, every path.
async fn proxy_handler(State(forwarder): State<Forwarder>, request: Request<Body>) -> Response {
    forwarder.handle(request).await
}

/// A panic while handling a request still yields the 502 JSON shape.
fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "request handler panicked".to_string()
    };
    tracing::error!(error = %message, "Handler panicked");
    proxy_error_response(&message)
}
