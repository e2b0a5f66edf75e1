//! C8 — BatchClusterer (§4.8).
//!
//! Greedy seed-anchored agglomeration over a batch's context vectors, in
//! input order, so cluster formation is deterministic given that order
//! (§5). A candidate joins the first existing cluster whose *seed* (its
//! first, founding member) it clears `cluster_similarity_threshold`
//! against; otherwise it seeds a new cluster. Absorption is checked only
//! against the seed, not every member already absorbed — chaining through
//! intermediate members would let a cluster's tail drift arbitrarily far
//! from its seed (§4.8: "absorb any later candidate whose cosine to the
//! seed exceeds the threshold").

use noteroute_core::config::{BatchConfig, ClusteringConfig};
use noteroute_core::model::{ClusterAction, ClusterProposal, FolderSuggestion};
use noteroute_vectormath::{centroid, coherence, cosine};
use tracing::info;

use crate::naming;

/// One batch member: its concept id, distilled title (to name a
/// `create_folder` suggestion), and context vector.
#[derive(Debug, Clone)]
pub struct ClusterMember {
    pub concept_id: String,
    pub title: String,
    pub context_vector: Vec<f32>,
}

/// Result of clustering one batch.
#[derive(Debug, Clone, Default)]
pub struct BatchClusterOutcome {
    pub proposals: Vec<ClusterProposal>,
    pub suggestions: Vec<FolderSuggestion>,
}

/// Cluster `members` by greedy seed-anchored agglomeration.
///
/// Singleton clusters are noise and are dropped entirely (not returned).
/// Multi-member clusters below `batch.min_cluster_size` still produce a
/// `route_together` proposal — small enough not to warrant a new folder,
/// but related enough to cross-link — while clusters at or above the
/// threshold are promoted to `create_folder` with a named suggestion.
/// This is how "drop clusters below min_cluster_size" and "action =
/// create_folder if size >= min_cluster_size else route_together" both
/// hold without contradiction: "drop" governs folder-creation candidacy,
/// not whether the cluster is reported at all.
pub fn cluster(members: &[ClusterMember], clustering: &ClusteringConfig, batch: &BatchConfig) -> BatchClusterOutcome {
    let mut clusters: Vec<Vec<usize>> = Vec::new();

    for (idx, member) in members.iter().enumerate() {
        let mut joined = false;
        for cluster_indices in clusters.iter_mut() {
            if cluster_indices.len() >= clustering.max_cluster_size {
                continue;
            }
            let seed = cluster_indices[0];
            let clears = cosine(&member.context_vector, &members[seed].context_vector).unwrap_or(0.0)
                >= clustering.cluster_similarity_threshold;
            if clears {
                cluster_indices.push(idx);
                joined = true;
                break;
            }
        }
        if !joined {
            clusters.push(vec![idx]);
        }
    }

    let mut noise_count = 0usize;
    let mut dropped_for_size = 0usize;
    let mut proposals = Vec::new();
    let mut suggestions = Vec::new();

    for cluster_indices in &clusters {
        if cluster_indices.len() <= 1 {
            noise_count += 1;
            continue;
        }

        let vectors: Vec<Vec<f32>> = cluster_indices.iter().map(|&i| members[i].context_vector.clone()).collect();
        let cluster_centroid = centroid(&vectors).unwrap_or_default();
        let cluster_coherence = coherence(&vectors).unwrap_or(0.0);
        let member_ids: Vec<String> = cluster_indices.iter().map(|&i| members[i].concept_id.clone()).collect();

        let action = if cluster_indices.len() >= batch.min_cluster_size {
            ClusterAction::CreateFolder
        } else {
            dropped_for_size += 1;
            ClusterAction::RouteTogether
        };

        if matches!(action, ClusterAction::CreateFolder) && batch.enable_folder_creation {
            let seed_title = &members[cluster_indices[0]].title;
            suggestions.push(FolderSuggestion {
                name: naming::name_from_title(seed_title),
                members: member_ids.clone(),
                confidence: cluster_coherence,
            });
        }

        proposals.push(ClusterProposal {
            members: member_ids,
            centroid: cluster_centroid,
            coherence: cluster_coherence,
            action,
        });
    }

    info!(
        cluster_count = proposals.len(),
        noise_count, dropped_for_size, "batch clusterer: clustering complete"
    );

    BatchClusterOutcome { proposals, suggestions }
}
