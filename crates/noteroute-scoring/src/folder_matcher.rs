//! C4 — FolderMatcher (§4.4).
//!
//! Context-vector search against the index, grouped by folder id and
//! scored via [`crate::folder_scorer`]. Unlike the duplicate detector,
//! failure here is fatal — it bubbles up as `RouterError::Stage("route")`
//! at the pipeline layer, since a failed match means the decision maker
//! has nothing to decide on.

use std::collections::HashMap;

use noteroute_core::cancellation::CancellationToken;
use noteroute_core::config::FolderScoringConfig;
use noteroute_core::errors::ProviderError;
use noteroute_core::model::{normalize_folder_id, FolderMatch};
use noteroute_core::traits::{SearchParams, VectorIndex};

use crate::folder_scorer;

/// Run the context search and return folder matches sorted descending by
/// score. Ties break by higher `concept_count`, then lexicographically
/// by `folder_id` (§4.2).
pub async fn match_folders(
    index: &dyn VectorIndex,
    context_vector: &[f32],
    threshold: f64,
    limit: usize,
    scoring: &FolderScoringConfig,
    cancel: &CancellationToken,
) -> Result<Vec<FolderMatch>, ProviderError> {
    let params = SearchParams { threshold, limit };
    let hits = index.search_by_context(context_vector, params, cancel).await?;

    let mut groups: HashMap<String, Vec<(String, f64)>> = HashMap::new();
    for hit in hits {
        let folder_id = normalize_folder_id(hit.folder_id.as_deref());
        groups
            .entry(folder_id)
            .or_default()
            .push((hit.concept_id, hit.similarity));
    }

    let mut matches: Vec<FolderMatch> = groups
        .into_iter()
        .map(|(folder_id, mut similar_concepts)| {
            similar_concepts.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
            let sims: Vec<f64> = similar_concepts.iter().map(|(_, s)| *s).collect();
            let score = folder_scorer::score(&sims, scoring);
            FolderMatch {
                folder_id,
                score,
                concept_count: similar_concepts.len(),
                similar_concepts,
            }
        })
        .collect();

    matches.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.concept_count.cmp(&a.concept_count))
            .then_with(|| a.folder_id.cmp(&b.folder_id))
    });

    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use noteroute_core::traits::SearchHit;

    fn hit(concept_id: &str, similarity: f64, folder_id: Option<&str>) -> SearchHit {
        SearchHit {
            concept_id: concept_id.into(),
            similarity,
            folder_id: folder_id.map(String::from),
            is_primary: Some(true),
        }
    }

    #[test]
    fn groups_and_scores_by_folder() {
        let hits = vec![
            hit("c1", 0.85, Some("ml-folder")),
            hit("c2", 0.83, Some("ml-folder")),
            hit("c3", 0.60, Some("other")),
        ];
        let cfg = FolderScoringConfig::default();

        let mut groups: HashMap<String, Vec<(String, f64)>> = HashMap::new();
        for h in hits {
            let folder_id = normalize_folder_id(h.folder_id.as_deref());
            groups.entry(folder_id).or_default().push((h.concept_id, h.similarity));
        }
        let ml = groups.get("ml-folder").unwrap();
        let sims: Vec<f64> = ml.iter().map(|(_, s)| *s).collect();
        let score = folder_scorer::score(&sims, &cfg);
        assert!((score - 0.874).abs() < 1e-3);
    }

    #[test]
    fn missing_folder_id_defaults_to_unsorted() {
        assert_eq!(normalize_folder_id(None), "unsorted");
    }

    #[test]
    fn tie_breaks_by_concept_count_then_folder_id() {
        let mut matches = vec![
            FolderMatch {
                folder_id: "z".into(),
                score: 0.5,
                concept_count: 1,
                similar_concepts: vec![],
            },
            FolderMatch {
                folder_id: "a".into(),
                score: 0.5,
                concept_count: 2,
                similar_concepts: vec![],
            },
            FolderMatch {
                folder_id: "b".into(),
                score: 0.5,
                concept_count: 2,
                similar_concepts: vec![],
            },
        ];
        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap()
                .then_with(|| b.concept_count.cmp(&a.concept_count))
                .then_with(|| a.folder_id.cmp(&b.folder_id))
        });
        assert_eq!(matches[0].folder_id, "a");
        assert_eq!(matches[1].folder_id, "b");
        assert_eq!(matches[2].folder_id, "z");
    }
}
