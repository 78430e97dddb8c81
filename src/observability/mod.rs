//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All handlers produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging; the request ID appears in every per-request event
//! - Metrics are cheap (atomic increments) and recorded in middleware
//! - The metrics exporter is optional and off by default

pub mod logging;
pub mod metrics;
