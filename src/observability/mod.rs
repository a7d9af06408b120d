//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Forwarder and server produce:
//!     → logging.rs (structured tracing events, per-request spans)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (tracing-subscriber fmt layer)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Logging is a side effect; it never changes a response
//! - Metrics calls are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
