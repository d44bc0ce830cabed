//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Routing and config subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape, watch mode only)
//! ```
//!
//! # Design Decisions
//! - Structured logging via tracing, filter from env or config
//! - Metrics are cheap (atomic increments behind the metrics facade)
//! - Exposition is optional; the facade no-ops without an exporter

pub mod logging;
pub mod metrics;
