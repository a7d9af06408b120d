//! edge-relay: a thin HTTP reverse-forwarding relay.
//!
//! Every inbound request, whatever its method or path, is forwarded to one
//! fixed upstream origin. The path and query pass through as received, the
//! `Host` header is rewritten, platform-injected headers are stripped, and
//! the upstream response streams back with `Content-Encoding` removed.
//! Redirects are relayed, never followed. A failed forward becomes
//! `502 {"error":"Proxy error","message":...}`.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use proxy::Forwarder;
