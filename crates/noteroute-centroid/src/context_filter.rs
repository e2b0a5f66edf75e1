//! Context filtering for the policy-LLM prompt (§4.6): given a query
//! vector, a token budget, and the system phase, pick the folders most
//! worth mentioning without blowing the prompt's token budget.

use noteroute_core::config::{CentroidConfig, SystemPhase};
use noteroute_core::model::FolderId;
use noteroute_vectormath::cosine;

/// One folder surfaced for context, with the similarity that ranked it.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextFolder {
    pub folder_id: FolderId,
    pub similarity: f64,
}

/// Rank `folders` by similarity to `query` and greedily take as many as
/// fit the token budget, subject to a similarity floor.
///
/// In [`SystemPhase::Bootstrap`], the floor is relaxed (halved) and the
/// folder count is additionally capped at `config.bootstrap_max_folders`
/// — with only a handful of folders in existence, a strict floor would
/// starve the prompt of any context at all, but an uncapped one would
/// just dump everything back in, defeating the phase's purpose of
/// forcing the router toward diversity early on.
pub fn select(
    folders: &[(FolderId, Vec<f32>)],
    query: &[f32],
    phase: SystemPhase,
    config: &CentroidConfig,
) -> Vec<ContextFolder> {
    let floor = match phase {
        SystemPhase::Bootstrap => config.context_similarity_floor / 2.0,
        _ => config.context_similarity_floor,
    };

    let mut scored: Vec<ContextFolder> = folders
        .iter()
        .filter_map(|(id, centroid)| {
            let sim = cosine(query, centroid).unwrap_or(0.0);
            (sim >= floor).then_some(ContextFolder { folder_id: id.clone(), similarity: sim })
        })
        .collect();

    scored.sort_by(|a, b| b.similarity.partial_cmp(&a.similarity).unwrap_or(std::cmp::Ordering::Equal));

    let budget_cap = if config.tokens_per_folder == 0 {
        scored.len()
    } else {
        config.context_token_budget / config.tokens_per_folder
    };
    let cap = match phase {
        SystemPhase::Bootstrap => budget_cap.min(config.bootstrap_max_folders),
        _ => budget_cap,
    };

    scored.truncate(cap);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folders() -> Vec<(FolderId, Vec<f32>)> {
        vec![
            ("a".to_string(), vec![1.0, 0.0]),
            ("b".to_string(), vec![0.7, 0.7]),
            ("c".to_string(), vec![0.0, 1.0]),
        ]
    }

    #[test]
    fn ranks_by_similarity_descending() {
        let config = CentroidConfig { context_similarity_floor: 0.0, ..CentroidConfig::default() };
        let picked = select(&folders(), &[1.0, 0.0], SystemPhase::Growing, &config);
        assert_eq!(picked[0].folder_id, "a");
    }

    #[test]
    fn bootstrap_caps_folder_count() {
        let config = CentroidConfig {
            context_similarity_floor: 0.0,
            bootstrap_max_folders: 1,
            context_token_budget: 100_000,
            tokens_per_folder: 1,
            ..CentroidConfig::default()
        };
        let picked = select(&folders(), &[1.0, 0.0], SystemPhase::Bootstrap, &config);
        assert_eq!(picked.len(), 1);
    }

    #[test]
    fn token_budget_limits_count() {
        let config = CentroidConfig {
            context_similarity_floor: 0.0,
            context_token_budget: 2,
            tokens_per_folder: 1,
            ..CentroidConfig::default()
        };
        let picked = select(&folders(), &[1.0, 0.0], SystemPhase::Mature, &config);
        assert_eq!(picked.len(), 2);
    }

    #[test]
    fn similarity_floor_excludes_weak_matches() {
        let config = CentroidConfig { context_similarity_floor: 0.9, ..CentroidConfig::default() };
        let picked = select(&folders(), &[1.0, 0.0], SystemPhase::Mature, &config);
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].folder_id, "a");
    }
}
