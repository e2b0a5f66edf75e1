//! # noteroute-pipeline
//!
//! Per-candidate pipeline sequencing (C7) and batch clustering (C8):
//! the orchestration layer between the pure decision core
//! (`noteroute-scoring`) and the router facade.

mod batch_clusterer;
mod expansion;
mod naming;
mod pipeline;

pub use batch_clusterer::{cluster, BatchClusterOutcome, ClusterMember};
pub use expansion::detect_expansion_opportunity;
pub use pipeline::{Pipeline, PipelineFailure, PipelineOutcome, PipelineResult};
