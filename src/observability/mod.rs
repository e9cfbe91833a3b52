//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and upstream client produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters and histograms)
//!
//! Consumers:
//!     → stdout log aggregation
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! Request IDs are attached by the HTTP layer and show up in the
//! `tower_http` trace spans.

pub mod logging;
pub mod metrics;
