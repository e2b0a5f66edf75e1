use async_trait::async_trait;

use crate::cancellation::CancellationToken;
use crate::errors::ProviderError;
use crate::model::{FolderId, FolderPlacement, VectorEmbeddings};

/// One hit from a title or context search, sorted descending by
/// similarity by the implementation.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub concept_id: String,
    pub similarity: f64,
    /// Absent folder id is normalised to `"unsorted"` by the index at
    /// ingress (design note, §9) — callers of this trait should already
    /// see `Some("unsorted")` rather than `None` for unplaced concepts,
    /// but the field stays optional to cover legacy index contents that
    /// predate that normalisation.
    pub folder_id: Option<FolderId>,
    pub is_primary: Option<bool>,
}

/// Parameters shared by `search_by_title` and `search_by_context`.
#[derive(Debug, Clone, Copy)]
pub struct SearchParams {
    pub threshold: f64,
    pub limit: usize,
}

/// One concept's persisted record, as upserted after a routing decision.
#[derive(Debug, Clone)]
pub struct UpsertRequest {
    pub concept_id: String,
    pub embeddings: VectorEmbeddings,
    pub placement: FolderPlacement,
}

/// Vectors backing a folder's centroid/exemplar state, as read back for
/// `CentroidManager` bootstrapping or redundancy checks.
#[derive(Debug, Clone)]
pub struct FolderVectorData {
    pub folder_id: FolderId,
    pub member_vectors: Vec<Vec<f32>>,
}

/// The vector index / KV+ANN backend (§6). Persistence format is
/// explicitly out of scope (§1); the core depends only on this contract.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Overwrite the persisted record for `request.concept_id`.
    async fn upsert(
        &self,
        request: UpsertRequest,
        cancel: &CancellationToken,
    ) -> Result<(), ProviderError>;

    /// Top-N search over title vectors, sorted descending by similarity.
    async fn search_by_title(
        &self,
        vector: &[f32],
        params: SearchParams,
        cancel: &CancellationToken,
    ) -> Result<Vec<SearchHit>, ProviderError>;

    /// Top-N search over context vectors, sorted descending by
    /// similarity.
    async fn search_by_context(
        &self,
        vector: &[f32],
        params: SearchParams,
        cancel: &CancellationToken,
    ) -> Result<Vec<SearchHit>, ProviderError>;

    /// Concepts placed in `folder_id`; primary-only unless
    /// `include_references` is set.
    async fn search_by_folder(
        &self,
        folder_id: &FolderId,
        include_references: bool,
        cancel: &CancellationToken,
    ) -> Result<Vec<SearchHit>, ProviderError>;

    /// Member vectors for intra-folder analytics (centroid/exemplar
    /// recomputation), optionally capped at `limit`.
    async fn get_folder_members(
        &self,
        folder_id: &FolderId,
        limit: Option<usize>,
        cancel: &CancellationToken,
    ) -> Result<Vec<Vec<f32>>, ProviderError>;

    /// All known folder ids, including `"unsorted"`.
    async fn get_all_folder_ids(&self, cancel: &CancellationToken) -> Result<Vec<FolderId>, ProviderError>;

    /// Persist a recomputed centroid for `folder_id`.
    async fn set_folder_centroid(
        &self,
        folder_id: &FolderId,
        centroid: Vec<f32>,
        cancel: &CancellationToken,
    ) -> Result<(), ProviderError>;

    /// Persist a recomputed exemplar set for `folder_id`.
    async fn set_folder_exemplars(
        &self,
        folder_id: &FolderId,
        exemplars: Vec<Vec<f32>>,
        cancel: &CancellationToken,
    ) -> Result<(), ProviderError>;

    /// Read back a folder's member vectors, or `None` if the folder is
    /// unknown. Never errors on a miss — per §7, lookups return `None`.
    async fn get_folder_vector_data(
        &self,
        folder_id: &FolderId,
        cancel: &CancellationToken,
    ) -> Result<Option<FolderVectorData>, ProviderError>;

    /// Remove a concept's persisted record.
    async fn delete(&self, concept_id: &str, cancel: &CancellationToken) -> Result<(), ProviderError>;

    /// Dimensionality this index was configured for.
    fn dimensions(&self) -> usize;

    /// Whether the backend is currently reachable.
    fn is_ready(&self) -> bool;
}
