//! In-memory `VectorIndex` mock. No persistence, no network — every
//! concept's embeddings and placement live in a `DashMap` for the
//! lifetime of the test.

use async_trait::async_trait;
use dashmap::DashMap;

use noteroute_core::cancellation::CancellationToken;
use noteroute_core::errors::ProviderError;
use noteroute_core::model::{normalize_folder_id, FolderId, FolderPlacement, VectorEmbeddings};
use noteroute_core::traits::{FolderVectorData, SearchHit, SearchParams, UpsertRequest, VectorIndex};

struct Record {
    embeddings: VectorEmbeddings,
    placement: FolderPlacement,
}

/// A fully in-process `VectorIndex`. Always reachable (`is_ready`
/// returns `true`); `upsert`/`search_*`/`delete` never return an error.
pub struct InMemoryVectorIndex {
    dims: usize,
    records: DashMap<String, Record>,
    centroids: DashMap<FolderId, Vec<f32>>,
    exemplars: DashMap<FolderId, Vec<Vec<f32>>>,
}

impl InMemoryVectorIndex {
    pub fn new(dims: usize) -> Self {
        Self {
            dims,
            records: DashMap::new(),
            centroids: DashMap::new(),
            exemplars: DashMap::new(),
        }
    }

    fn search(&self, query: &[f32], params: SearchParams, pick: impl Fn(&VectorEmbeddings) -> &Vec<f32>) -> Vec<SearchHit> {
        let mut hits: Vec<SearchHit> = Vec::new();
        for entry in self.records.iter() {
            let record = entry.value();
            let Ok(similarity) = noteroute_vectormath::cosine(query, pick(&record.embeddings)) else {
                continue;
            };
            if similarity < params.threshold {
                continue;
            }
            hits.push(SearchHit {
                concept_id: entry.key().clone(),
                similarity,
                folder_id: Some(record.placement.primary.clone()),
                is_primary: Some(true),
            });
            for reference in &record.placement.references {
                hits.push(SearchHit {
                    concept_id: entry.key().clone(),
                    similarity,
                    folder_id: Some(reference.clone()),
                    is_primary: Some(false),
                });
            }
        }
        hits.sort_by(|a, b| b.similarity.partial_cmp(&a.similarity).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(params.limit);
        hits
    }
}

#[async_trait]
impl VectorIndex for InMemoryVectorIndex {
    async fn upsert(&self, request: UpsertRequest, _cancel: &CancellationToken) -> Result<(), ProviderError> {
        self.records.insert(
            request.concept_id,
            Record {
                embeddings: request.embeddings,
                placement: request.placement,
            },
        );
        Ok(())
    }

    async fn search_by_title(&self, vector: &[f32], params: SearchParams, _cancel: &CancellationToken) -> Result<Vec<SearchHit>, ProviderError> {
        Ok(self.search(vector, params, |e| &e.title_vector))
    }

    async fn search_by_context(&self, vector: &[f32], params: SearchParams, _cancel: &CancellationToken) -> Result<Vec<SearchHit>, ProviderError> {
        Ok(self.search(vector, params, |e| &e.context_vector))
    }

    async fn search_by_folder(&self, folder_id: &FolderId, include_references: bool, _cancel: &CancellationToken) -> Result<Vec<SearchHit>, ProviderError> {
        let mut hits = Vec::new();
        for entry in self.records.iter() {
            let record = entry.value();
            if &record.placement.primary == folder_id {
                hits.push(SearchHit {
                    concept_id: entry.key().clone(),
                    similarity: 1.0,
                    folder_id: Some(folder_id.clone()),
                    is_primary: Some(true),
                });
            } else if include_references && record.placement.references.contains(folder_id) {
                hits.push(SearchHit {
                    concept_id: entry.key().clone(),
                    similarity: 1.0,
                    folder_id: Some(folder_id.clone()),
                    is_primary: Some(false),
                });
            }
        }
        Ok(hits)
    }

    async fn get_folder_members(&self, folder_id: &FolderId, limit: Option<usize>, _cancel: &CancellationToken) -> Result<Vec<Vec<f32>>, ProviderError> {
        let mut members: Vec<Vec<f32>> = self
            .records
            .iter()
            .filter(|entry| &entry.value().placement.primary == folder_id)
            .map(|entry| entry.value().embeddings.context_vector.clone())
            .collect();
        if let Some(limit) = limit {
            members.truncate(limit);
        }
        Ok(members)
    }

    async fn get_all_folder_ids(&self, _cancel: &CancellationToken) -> Result<Vec<FolderId>, ProviderError> {
        let mut ids: Vec<FolderId> = self
            .records
            .iter()
            .flat_map(|entry| {
                let placement = &entry.value().placement;
                std::iter::once(placement.primary.clone()).chain(placement.references.clone())
            })
            .collect();
        ids.sort();
        ids.dedup();
        Ok(ids)
    }

    async fn set_folder_centroid(&self, folder_id: &FolderId, centroid: Vec<f32>, _cancel: &CancellationToken) -> Result<(), ProviderError> {
        self.centroids.insert(folder_id.clone(), centroid);
        Ok(())
    }

    async fn set_folder_exemplars(&self, folder_id: &FolderId, exemplars: Vec<Vec<f32>>, _cancel: &CancellationToken) -> Result<(), ProviderError> {
        self.exemplars.insert(folder_id.clone(), exemplars);
        Ok(())
    }

    async fn get_folder_vector_data(&self, folder_id: &FolderId, cancel: &CancellationToken) -> Result<Option<FolderVectorData>, ProviderError> {
        let members = self.get_folder_members(folder_id, None, cancel).await?;
        if members.is_empty() {
            return Ok(None);
        }
        Ok(Some(FolderVectorData {
            folder_id: folder_id.clone(),
            member_vectors: members,
        }))
    }

    async fn delete(&self, concept_id: &str, _cancel: &CancellationToken) -> Result<(), ProviderError> {
        self.records.remove(concept_id);
        Ok(())
    }

    fn dimensions(&self) -> usize {
        self.dims
    }

    fn is_ready(&self) -> bool {
        true
    }
}

/// Helper for tests that only care about grouping, not persisted
/// placement: normalize a possibly-missing folder id the same way the
/// index does at ingress.
pub fn folder_or_unsorted(folder_id: Option<&str>) -> FolderId {
    normalize_folder_id(folder_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use noteroute_core::model::VectorEmbeddings;
    use std::collections::HashMap;

    fn embeddings(vector: Vec<f32>) -> VectorEmbeddings {
        VectorEmbeddings {
            title_vector: vector.clone(),
            context_vector: vector,
            content_hash: "hash".into(),
            model: "stub".into(),
            dimensions: 2,
            cached: false,
            embedded_at: Utc::now(),
        }
    }

    fn placement(primary: &str) -> FolderPlacement {
        let mut confidences = HashMap::new();
        confidences.insert(primary.to_string(), 0.9);
        FolderPlacement::new(primary.to_string(), vec![], confidences).unwrap()
    }

    #[tokio::test]
    async fn upsert_then_search_finds_the_concept() {
        let index = InMemoryVectorIndex::new(2);
        let cancel = CancellationToken::new();
        index
            .upsert(
                UpsertRequest {
                    concept_id: "c1".into(),
                    embeddings: embeddings(vec![1.0, 0.0]),
                    placement: placement("ml-folder"),
                },
                &cancel,
            )
            .await
            .unwrap();

        let hits = index
            .search_by_context(&[1.0, 0.0], SearchParams { threshold: 0.5, limit: 10 }, &cancel)
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].folder_id.as_deref(), Some("ml-folder"));
    }

    #[tokio::test]
    async fn delete_removes_the_concept() {
        let index = InMemoryVectorIndex::new(2);
        let cancel = CancellationToken::new();
        index
            .upsert(
                UpsertRequest {
                    concept_id: "c1".into(),
                    embeddings: embeddings(vec![1.0, 0.0]),
                    placement: placement("ml-folder"),
                },
                &cancel,
            )
            .await
            .unwrap();
        index.delete("c1", &cancel).await.unwrap();
        let hits = index
            .search_by_context(&[1.0, 0.0], SearchParams { threshold: 0.0, limit: 10 }, &cancel)
            .await
            .unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn get_folder_members_only_returns_primary_placements() {
        let index = InMemoryVectorIndex::new(2);
        let cancel = CancellationToken::new();
        index
            .upsert(
                UpsertRequest {
                    concept_id: "c1".into(),
                    embeddings: embeddings(vec![1.0, 0.0]),
                    placement: placement("ml-folder"),
                },
                &cancel,
            )
            .await
            .unwrap();
        let members = index.get_folder_members(&"ml-folder".to_string(), None, &cancel).await.unwrap();
        assert_eq!(members.len(), 1);
        let other = index.get_folder_members(&"other".to_string(), None, &cancel).await.unwrap();
        assert!(other.is_empty());
    }
}
