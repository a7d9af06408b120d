//! HTTP hosting of the Forwarder.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum, catch-panic, trace span)
//!     → request.rs (request id on the span)
//!     → proxy::Forwarder
//!     → response.rs (502 JSON when forwarding fails)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{make_request_span, RequestId};
pub use response::{proxy_error_response, PROXY_ERROR};
pub use server::HttpServer;
