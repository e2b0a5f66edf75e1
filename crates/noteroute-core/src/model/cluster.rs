use serde::{Deserialize, Serialize};

use super::folder::FolderId;

/// What a batch clusterer recommends doing with a cluster.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ClusterAction {
    /// Large and coherent enough to become its own folder.
    CreateFolder,
    /// Too small to be a folder on its own, but members should be routed
    /// together (e.g. all as references of each other).
    RouteTogether,
    /// Ambiguous; a human should look at it.
    Review,
}

/// One cluster discovered by the batch clusterer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClusterProposal {
    /// Ids of the concept candidates in this cluster.
    pub members: Vec<String>,
    pub centroid: Vec<f32>,
    /// Mean cosine of members to the centroid.
    pub coherence: f64,
    pub action: ClusterAction,
}

/// A proposed new folder derived from a `create_folder` cluster, or from
/// the single-candidate expansion-opportunity check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FolderSuggestion {
    pub name: FolderId,
    pub members: Vec<String>,
    pub confidence: f64,
}
