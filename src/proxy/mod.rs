//! Forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → upstream.rs (fixed origin + inbound path/query → upstream URL)
//!     → headers.rs (copy, overwrite Host, strip platform headers)
//!     → forwarder.rs (send upstream, no redirects, stream bodies)
//!     → headers.rs (drop Content-Encoding)
//!     → relayed response
//!
//! any failure
//!     → error.rs (ForwardError)
//!     → 502 {"error":"Proxy error","message":...}
//! ```
//!
//! # Design Decisions
//! - Path and query pass through as received; the relay is a dumb pipe
//! - Bodies stream in both directions, never buffered
//! - No retries; one attempt per inbound request

pub mod error;
pub mod forwarder;
pub mod headers;
pub mod upstream;

pub use error::ForwardError;
pub use forwarder::Forwarder;
pub use upstream::UpstreamOrigin;
