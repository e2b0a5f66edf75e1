//! # noteroute-core
//!
//! Foundation crate for the noteroute semantic-routing engine.
//! Defines the data model, capability traits, configuration, and the
//! crate-wide error type. Every other crate in the workspace depends on
//! this one.

pub mod cancellation;
pub mod config;
pub mod constants;
pub mod errors;
pub mod model;
pub mod traits;

pub use cancellation::{Cancellable, CancellationToken};
pub use config::RoutingConfig;
pub use errors::{ProviderError, ProviderErrorKind, RouterError, RouterResult, Stage};
pub use model::{
    ClusterProposal, ConceptCandidate, DistilledContent, FolderCentroid, FolderId, FolderMatch,
    FolderPlacement, FolderQuality, RoutingDecision, VectorEmbeddings,
};
