//! The routing core's data model (§3 of the spec).

mod candidate;
mod cluster;
mod decision;
mod distilled;
mod embeddings;
mod folder;

pub use candidate::{CandidateSource, ConceptCandidate};
pub use cluster::{ClusterAction, ClusterProposal, FolderSuggestion};
pub use decision::{
    DecisionExplanation, DecisionFactor, FolderMatchSummary, PrimarySignal, RoutingDecision,
    SimilarConcept,
};
pub use distilled::DistilledContent;
pub use embeddings::VectorEmbeddings;
pub use folder::{
    normalize_folder_id, FolderCentroid, FolderId, FolderMatch, FolderPlacement, FolderQuality,
    PlacementInvariantError,
};
