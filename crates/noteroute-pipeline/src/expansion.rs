//! Expansion-opportunity detection (§4.8): after a single candidate is
//! distilled and embedded, check whether enough of its context-vector
//! neighbours are themselves unsorted to justify proposing a brand-new
//! folder, rather than waiting for the next batch clustering pass.

use noteroute_core::cancellation::CancellationToken;
use noteroute_core::config::ClusteringConfig;
use noteroute_core::constants::UNSORTED_FOLDER_ID;
use noteroute_core::errors::ProviderError;
use noteroute_core::model::{normalize_folder_id, FolderSuggestion};
use noteroute_core::traits::{SearchParams, VectorIndex};

use crate::naming;

/// Search the index for neighbours of `context_vector` that are
/// themselves unsorted, at `clustering.unsorted_similarity_threshold`.
/// If at least `min_cluster_size - 1` such neighbours are found (the
/// candidate itself would be the `min_cluster_size`th member), propose a
/// new folder named from `title`'s top non-stopword tokens, with
/// confidence equal to the mean hit similarity. `members` is the
/// candidate's own id plus the unsorted hits (§8 S6).
pub async fn detect_expansion_opportunity(
    candidate_id: &str,
    title: &str,
    context_vector: &[f32],
    index: &dyn VectorIndex,
    clustering: &ClusteringConfig,
    min_cluster_size: usize,
    cancel: &CancellationToken,
) -> Result<Option<FolderSuggestion>, ProviderError> {
    let params = SearchParams {
        threshold: clustering.unsorted_similarity_threshold,
        limit: clustering.unsorted_search_limit,
    };
    let hits = index.search_by_context(context_vector, params, cancel).await?;

    let unsorted_hits: Vec<_> = hits
        .into_iter()
        .filter(|hit| normalize_folder_id(hit.folder_id.as_deref()) == UNSORTED_FOLDER_ID)
        .collect();

    if unsorted_hits.len() < min_cluster_size.saturating_sub(1) {
        return Ok(None);
    }

    let mean_similarity = unsorted_hits.iter().map(|h| h.similarity).sum::<f64>() / unsorted_hits.len() as f64;
    let mut members = vec![candidate_id.to_string()];
    members.extend(unsorted_hits.into_iter().map(|h| h.concept_id));

    Ok(Some(FolderSuggestion {
        name: naming::name_from_title(title),
        members,
        confidence: mean_similarity,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use noteroute_core::errors::ProviderErrorKind;
    use noteroute_core::traits::{FolderVectorData, SearchHit, UpsertRequest};

    struct StubIndex {
        hits: Vec<SearchHit>,
    }

    #[async_trait::async_trait]
    impl VectorIndex for StubIndex {
        async fn upsert(&self, _req: UpsertRequest, _cancel: &CancellationToken) -> Result<(), ProviderError> {
            Ok(())
        }
        async fn search_by_title(&self, _v: &[f32], _p: SearchParams, _c: &CancellationToken) -> Result<Vec<SearchHit>, ProviderError> {
            Ok(vec![])
        }
        async fn search_by_context(&self, _v: &[f32], _p: SearchParams, _c: &CancellationToken) -> Result<Vec<SearchHit>, ProviderError> {
            Ok(self.hits.clone())
        }
        async fn search_by_folder(&self, _f: &String, _i: bool, _c: &CancellationToken) -> Result<Vec<SearchHit>, ProviderError> {
            Ok(vec![])
        }
        async fn get_folder_members(&self, _f: &String, _l: Option<usize>, _c: &CancellationToken) -> Result<Vec<Vec<f32>>, ProviderError> {
            Ok(vec![])
        }
        async fn get_all_folder_ids(&self, _c: &CancellationToken) -> Result<Vec<String>, ProviderError> {
            Ok(vec![])
        }
        async fn set_folder_centroid(&self, _f: &String, _c: Vec<f32>, _cancel: &CancellationToken) -> Result<(), ProviderError> {
            Ok(())
        }
        async fn set_folder_exemplars(&self, _f: &String, _e: Vec<Vec<f32>>, _cancel: &CancellationToken) -> Result<(), ProviderError> {
            Ok(())
        }
        async fn get_folder_vector_data(&self, _f: &String, _c: &CancellationToken) -> Result<Option<FolderVectorData>, ProviderError> {
            Ok(None)
        }
        async fn delete(&self, _id: &str, _c: &CancellationToken) -> Result<(), ProviderError> {
            Ok(())
        }
        fn dimensions(&self) -> usize {
            2
        }
        fn is_ready(&self) -> bool {
            true
        }
    }

    fn hit(id: &str, sim: f64, folder: Option<&str>) -> SearchHit {
        SearchHit {
            concept_id: id.into(),
            similarity: sim,
            folder_id: folder.map(String::from),
            is_primary: Some(true),
        }
    }

    #[tokio::test]
    async fn proposes_folder_when_enough_unsorted_neighbours() {
        let index = StubIndex {
            hits: vec![hit("c1", 0.8, Some("unsorted")), hit("c2", 0.75, Some("unsorted"))],
        };
        let clustering = ClusteringConfig::default();
        let cancel = CancellationToken::new();
        let result = detect_expansion_opportunity("cand", "Graph Theory Basics", &[1.0, 0.0], &index, &clustering, 3, &cancel)
            .await
            .unwrap();
        let suggestion = result.unwrap();
        assert_eq!(suggestion.name, "graph-theory-basics");
        assert_eq!(suggestion.members, vec!["cand".to_string(), "c1".to_string(), "c2".to_string()]);
        assert!((suggestion.confidence - 0.775).abs() < 1e-9);
    }

    #[tokio::test]
    async fn ignores_hits_outside_unsorted() {
        let index = StubIndex {
            hits: vec![hit("c1", 0.8, Some("ml-folder")), hit("c2", 0.75, Some("ml-folder"))],
        };
        let clustering = ClusteringConfig::default();
        let cancel = CancellationToken::new();
        let result = detect_expansion_opportunity("cand", "x", &[1.0, 0.0], &index, &clustering, 3, &cancel)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn not_enough_hits_yields_no_proposal() {
        let index = StubIndex {
            hits: vec![hit("c1", 0.8, Some("unsorted"))],
        };
        let clustering = ClusteringConfig::default();
        let cancel = CancellationToken::new();
        let result = detect_expansion_opportunity("cand", "x", &[1.0, 0.0], &index, &clustering, 3, &cancel)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn propagates_index_failure() {
        struct FailingIndex;
        #[async_trait::async_trait]
        impl VectorIndex for FailingIndex {
            async fn upsert(&self, _req: UpsertRequest, _cancel: &CancellationToken) -> Result<(), ProviderError> {
                Ok(())
            }
            async fn search_by_title(&self, _v: &[f32], _p: SearchParams, _c: &CancellationToken) -> Result<Vec<SearchHit>, ProviderError> {
                Ok(vec![])
            }
            async fn search_by_context(&self, _v: &[f32], _p: SearchParams, _c: &CancellationToken) -> Result<Vec<SearchHit>, ProviderError> {
                Err(ProviderError::new(ProviderErrorKind::Server, "boom"))
            }
            async fn search_by_folder(&self, _f: &String, _i: bool, _c: &CancellationToken) -> Result<Vec<SearchHit>, ProviderError> {
                Ok(vec![])
            }
            async fn get_folder_members(&self, _f: &String, _l: Option<usize>, _c: &CancellationToken) -> Result<Vec<Vec<f32>>, ProviderError> {
                Ok(vec![])
            }
            async fn get_all_folder_ids(&self, _c: &CancellationToken) -> Result<Vec<String>, ProviderError> {
                Ok(vec![])
            }
            async fn set_folder_centroid(&self, _f: &String, _c: Vec<f32>, _cancel: &CancellationToken) -> Result<(), ProviderError> {
                Ok(())
            }
            async fn set_folder_exemplars(&self, _f: &String, _e: Vec<Vec<f32>>, _cancel: &CancellationToken) -> Result<(), ProviderError> {
                Ok(())
            }
            async fn get_folder_vector_data(&self, _f: &String, _c: &CancellationToken) -> Result<Option<FolderVectorData>, ProviderError> {
                Ok(None)
            }
            async fn delete(&self, _id: &str, _c: &CancellationToken) -> Result<(), ProviderError> {
                Ok(())
            }
            fn dimensions(&self) -> usize {
                2
            }
            fn is_ready(&self) -> bool {
                true
            }
        }
        let index = FailingIndex;
        let clustering = ClusteringConfig::default();
        let cancel = CancellationToken::new();
        let result = detect_expansion_opportunity("cand", "x", &[1.0, 0.0], &index, &clustering, 3, &cancel).await;
        assert!(result.is_err());
    }
}
