//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters)
//!
//! Consumers:
//!     → stdout (fmt layer, filtered by RUST_LOG or config)
//!     → Metrics endpoint (Prometheus scrape, parent process only)
//! ```
//!
//! # Design Decisions
//! - Structured fields (`connection_id`, `pid`, `action`) instead of formatted text
//! - Metrics are cheap (atomic increments) and no-ops until an exporter is installed
//! - Workers are forked before the exporter starts, so only the parent serves it

pub mod logging;
pub mod metrics;
