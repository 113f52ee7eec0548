//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Proxy handlers and the loader produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every HTTP log line
//! - Secrets are never logged; api keys appear masked

pub mod logging;
pub mod metrics;
