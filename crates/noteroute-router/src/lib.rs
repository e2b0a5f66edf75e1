//! # noteroute-router
//!
//! The facade (C9/C10): wires the five capability collaborators and the
//! centroid manager into one entry point, applies side effects after a
//! decision, and tracks rolling statistics.

mod metrics;
mod router;

pub use metrics::{MetricsCollector, RouterStats};
pub use router::{BatchRoutingResult, Router};
