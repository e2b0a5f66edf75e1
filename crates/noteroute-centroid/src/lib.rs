//! # noteroute-centroid
//!
//! Per-folder centroid and exemplar maintenance (§4.6): incremental and
//! full-recompute centroid tracking, exemplar selection strategies,
//! cohesion/separation/stability quality metrics, phase-aware context
//! filtering for the policy-LLM prompt, and pairwise redundancy
//! detection.

mod context_filter;
mod exemplars;
mod manager;
mod quality;
mod redundancy;

pub use context_filter::ContextFolder;
pub use manager::CentroidManager;
pub use redundancy::RedundantPair;
