//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Gateway and service produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging with request IDs as fields
//! - Metrics are cheap; with no recorder installed they are no-ops

pub mod logging;
pub mod metrics;
