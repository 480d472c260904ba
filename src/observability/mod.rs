//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Listener, connection handler and contact handlers produce:
//!     → logging.rs (structured tracing events, per-connection spans)
//!     → metrics.rs (request counters, latency histogram, store gauge)
//!
//! Consumers:
//!     → stdout via tracing-subscriber fmt layer
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Log level from config, overridable by RUST_LOG
//! - Metric updates go through the `metrics` facade; without an installed
//!   recorder they are no-ops, so tests need no setup

pub mod logging;
pub mod metrics;
