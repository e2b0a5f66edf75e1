//! C6 — CentroidManager (§4.6).
//!
//! Owns every `FolderCentroid` in memory (per the design notes, the
//! vector index owns persisted vectors — this manager owns the derived
//! centroid/exemplar/quality state built from them). A per-folder
//! `parking_lot::RwLock` inside a `dashmap::DashMap` gives exclusive
//! access to one folder's `{centroid, exemplars, member_count}` during
//! an update while readers on other folders never block (§5).

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::{info, warn};

use noteroute_core::cancellation::CancellationToken;
use noteroute_core::config::{CentroidConfig, SystemPhase};
use noteroute_core::errors::{RouterError, RouterResult, Stage};
use noteroute_core::model::{FolderCentroid, FolderId, FolderQuality};
use noteroute_core::traits::VectorIndex;

use crate::context_filter::{self, ContextFolder};
use crate::exemplars;
use crate::quality;
use crate::redundancy::{self, RedundantPair};

struct FolderState {
    centroid: Vec<f32>,
    exemplars: Vec<Vec<f32>>,
    member_count: usize,
    last_updated: DateTime<Utc>,
    quality: FolderQuality,
    updates_since_recompute: usize,
}

impl FolderState {
    fn new_single_member(vector: &[f32]) -> Self {
        Self {
            centroid: vector.to_vec(),
            exemplars: vec![vector.to_vec()],
            member_count: 1,
            last_updated: Utc::now(),
            quality: FolderQuality::combine(1.0, 1.0, 1.0),
            updates_since_recompute: 0,
        }
    }

    fn snapshot(&self, folder_id: &FolderId) -> FolderCentroid {
        FolderCentroid {
            folder_id: folder_id.clone(),
            centroid: self.centroid.clone(),
            exemplars: self.exemplars.clone(),
            member_count: self.member_count,
            last_updated: self.last_updated,
            quality: self.quality,
        }
    }
}

pub struct CentroidManager {
    config: CentroidConfig,
    dimensions: usize,
    folders: DashMap<FolderId, RwLock<FolderState>>,
}

impl CentroidManager {
    pub fn new(config: CentroidConfig, dimensions: usize) -> Self {
        Self {
            config,
            dimensions,
            folders: DashMap::new(),
        }
    }

    /// Current centroid/exemplar/quality snapshot for one folder, or
    /// `None` if the folder has no members yet (§7: lookups return
    /// `None`, never an error).
    pub fn get(&self, folder_id: &FolderId) -> Option<FolderCentroid> {
        self.folders.get(folder_id).map(|entry| entry.read().snapshot(folder_id))
    }

    /// Snapshot of every known folder's centroid, for context filtering
    /// and redundancy detection.
    pub fn all_centroids(&self) -> Vec<(FolderId, Vec<f32>)> {
        self.folders
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().read().centroid.clone()))
            .collect()
    }

    /// Drop a folder's centroid state entirely (folder deletion).
    pub fn delete_folder(&self, folder_id: &FolderId) {
        self.folders.remove(folder_id);
    }

    /// Add one member vector to `folder_id`, creating the centroid on
    /// first member. Uses the incremental update formula
    /// `centroid' = (centroid*n + v)/(n+1)` unless the drift since the
    /// last full recompute reaches `incremental_threshold` or stability
    /// falls below `stability_floor`, in which case it falls back to a
    /// full recompute against every member vector the index holds.
    pub async fn add_member(
        &self,
        folder_id: &FolderId,
        vector: &[f32],
        index: &dyn VectorIndex,
        cancel: &CancellationToken,
    ) -> RouterResult<FolderCentroid> {
        if vector.len() != self.dimensions {
            return Err(RouterError::DimensionMismatch {
                expected: self.dimensions,
                actual: vector.len(),
            });
        }

        let needs_recompute = match self.folders.entry(folder_id.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(RwLock::new(FolderState::new_single_member(vector)));
                false
            }
            Entry::Occupied(slot) => {
                let mut state = slot.get().write();
                let n = state.member_count as f64;
                let old_centroid = state.centroid.clone();
                let mut new_centroid = vec![0.0f32; self.dimensions];
                for i in 0..self.dimensions {
                    new_centroid[i] = (((old_centroid[i] as f64) * n + vector[i] as f64) / (n + 1.0)) as f32;
                }
                state.member_count += 1;
                state.updates_since_recompute += 1;
                state.centroid = new_centroid;
                state.last_updated = Utc::now();

                let drifted = quality::stability(Some(&old_centroid), &state.centroid);
                state.updates_since_recompute >= self.config.incremental_threshold || drifted < self.config.stability_floor
            }
        };

        if needs_recompute {
            info!(folder_id = %folder_id, "centroid manager: incremental threshold crossed, full recompute");
            self.full_recompute(folder_id, index, cancel).await?;
        }

        Ok(self.get(folder_id).expect("folder was just inserted or updated"))
    }

    /// Remove one member vector from `folder_id` via the inverse of the
    /// incremental update. Drops the folder entirely if it had only one
    /// member left.
    pub async fn remove_member(
        &self,
        folder_id: &FolderId,
        vector: &[f32],
        index: &dyn VectorIndex,
        cancel: &CancellationToken,
    ) -> RouterResult<Option<FolderCentroid>> {
        let Some(entry) = self.folders.get(folder_id) else {
            return Ok(None);
        };

        let (emptied, needs_recompute) = {
            let mut state = entry.write();
            if state.member_count <= 1 {
                (true, false)
            } else {
                let n = state.member_count as f64;
                let mut new_centroid = vec![0.0f32; self.dimensions];
                for i in 0..self.dimensions {
                    new_centroid[i] = (((state.centroid[i] as f64) * n - vector[i] as f64) / (n - 1.0)) as f32;
                }
                state.member_count -= 1;
                state.updates_since_recompute += 1;
                state.centroid = new_centroid;
                state.last_updated = Utc::now();
                (false, state.updates_since_recompute >= self.config.incremental_threshold)
            }
        };
        drop(entry);

        if emptied {
            self.folders.remove(folder_id);
            return Ok(None);
        }
        if needs_recompute {
            self.full_recompute(folder_id, index, cancel).await?;
        }
        Ok(self.get(folder_id))
    }

    /// Recompute centroid, exemplars, and quality from every member
    /// vector the index currently holds. Per §7, a quality computation
    /// failure downgrades quality to `unknown` rather than failing the
    /// routing path that triggered it.
    async fn full_recompute(&self, folder_id: &FolderId, index: &dyn VectorIndex, cancel: &CancellationToken) -> RouterResult<()> {
        let members = index
            .get_folder_members(folder_id, None, cancel)
            .await
            .map_err(|e| RouterError::stage(Stage::Route, e))?;

        if members.is_empty() {
            warn!(folder_id = %folder_id, "full recompute: index returned no members, downgrading quality to unknown");
            if let Some(entry) = self.folders.get(folder_id) {
                entry.write().quality = FolderQuality::UNKNOWN;
            }
            return Ok(());
        }

        let new_centroid = noteroute_vectormath::centroid(&members).map_err(|_| RouterError::DimensionMismatch {
            expected: self.dimensions,
            actual: members.first().map(Vec::len).unwrap_or(0),
        })?;
        let new_exemplars = exemplars::select(&members, &new_centroid, self.config.exemplar_count, self.config.exemplar_strategy);

        let others: Vec<Vec<f32>> = self
            .folders
            .iter()
            .filter(|entry| entry.key() != folder_id)
            .map(|entry| entry.value().read().centroid.clone())
            .collect();

        let Some(entry) = self.folders.get(folder_id) else {
            return Ok(());
        };
        let mut state = entry.write();
        let previous = state.centroid.clone();
        state.quality = quality::assess(&members, &new_centroid, &others, Some(&previous));
        state.centroid = new_centroid;
        state.exemplars = new_exemplars;
        state.member_count = members.len();
        state.updates_since_recompute = 0;
        state.last_updated = Utc::now();

        Ok(())
    }

    /// Top folders by centroid similarity to `query`, bounded by the
    /// configured token budget and phase policy (§4.6).
    pub fn context_filter(&self, query: &[f32], phase: SystemPhase) -> Vec<ContextFolder> {
        context_filter::select(&self.all_centroids(), query, phase, &self.config)
    }

    /// Folder pairs whose centroids have drifted close enough to be
    /// plausibly redundant (§4.6, §B.5).
    pub fn find_redundant_folders(&self) -> Vec<RedundantPair> {
        redundancy::find_redundant(&self.all_centroids(), self.config.redundancy_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noteroute_core::errors::ProviderError;
    use noteroute_core::traits::{FolderVectorData, SearchHit, SearchParams, UpsertRequest};
    use parking_lot::Mutex;

    struct StubIndex {
        members: Mutex<std::collections::HashMap<String, Vec<Vec<f32>>>>,
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
            Ok(vec![])
        }
        async fn search_by_folder(&self, _f: &String, _i: bool, _c: &CancellationToken) -> Result<Vec<SearchHit>, ProviderError> {
            Ok(vec![])
        }
        async fn get_folder_members(
            &self,
            folder_id: &String,
            _limit: Option<usize>,
            _cancel: &CancellationToken,
        ) -> Result<Vec<Vec<f32>>, ProviderError> {
            Ok(self.members.lock().get(folder_id).cloned().unwrap_or_default())
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
            3
        }
        fn is_ready(&self) -> bool {
            true
        }
    }

    fn index_with(members: Vec<(&str, Vec<Vec<f32>>)>) -> StubIndex {
        let mut map = std::collections::HashMap::new();
        for (k, v) in members {
            map.insert(k.to_string(), v);
        }
        StubIndex { members: Mutex::new(map) }
    }

    #[tokio::test]
    async fn first_member_creates_centroid() {
        let manager = CentroidManager::new(CentroidConfig::default(), 3);
        let index = index_with(vec![]);
        let cancel = CancellationToken::new();
        let snap = manager.add_member(&"a".to_string(), &[1.0, 0.0, 0.0], &index, &cancel).await.unwrap();
        assert_eq!(snap.centroid, vec![1.0, 0.0, 0.0]);
        assert_eq!(snap.member_count, 1);
    }

    #[tokio::test]
    async fn incremental_add_matches_batch_centroid() {
        let manager = CentroidManager::new(CentroidConfig::default(), 3);
        let index = index_with(vec![]);
        let cancel = CancellationToken::new();
        let folder = "a".to_string();

        manager.add_member(&folder, &[1.0, 0.0, 0.0], &index, &cancel).await.unwrap();
        manager.add_member(&folder, &[0.0, 1.0, 0.0], &index, &cancel).await.unwrap();
        let snap = manager.add_member(&folder, &[0.0, 0.0, 1.0], &index, &cancel).await.unwrap();

        let expected = noteroute_vectormath::centroid(&[vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0], vec![0.0, 0.0, 1.0]]).unwrap();
        for (a, b) in snap.centroid.iter().zip(expected.iter()) {
            assert!((*a as f64 - *b as f64).abs() < 1e-6);
        }
    }

    #[tokio::test]
    async fn remove_last_member_drops_folder() {
        let manager = CentroidManager::new(CentroidConfig::default(), 3);
        let index = index_with(vec![]);
        let cancel = CancellationToken::new();
        let folder = "a".to_string();
        manager.add_member(&folder, &[1.0, 0.0, 0.0], &index, &cancel).await.unwrap();
        let result = manager.remove_member(&folder, &[1.0, 0.0, 0.0], &index, &cancel).await.unwrap();
        assert!(result.is_none());
        assert!(manager.get(&folder).is_none());
    }

    #[tokio::test]
    async fn incremental_threshold_triggers_full_recompute() {
        let mut config = CentroidConfig::default();
        config.incremental_threshold = 2;
        let manager = CentroidManager::new(config, 2);
        let folder = "a".to_string();
        let index = index_with(vec![("a", vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.5, 0.5]])]);
        let cancel = CancellationToken::new();

        manager.add_member(&folder, &[1.0, 0.0], &index, &cancel).await.unwrap();
        manager.add_member(&folder, &[0.0, 1.0], &index, &cancel).await.unwrap();
        let snap = manager.add_member(&folder, &[0.5, 0.5], &index, &cancel).await.unwrap();

        // After the 2nd incremental update crosses the threshold, the 3rd
        // add forces a recompute from the index's 3 canonical members.
        assert_eq!(snap.member_count, 3);
    }

    #[tokio::test]
    async fn dimension_mismatch_is_rejected() {
        let manager = CentroidManager::new(CentroidConfig::default(), 3);
        let index = index_with(vec![]);
        let cancel = CancellationToken::new();
        let result = manager.add_member(&"a".to_string(), &[1.0, 0.0], &index, &cancel).await;
        assert!(matches!(result, Err(RouterError::DimensionMismatch { .. })));
    }

    #[test]
    fn find_redundant_folders_reports_close_pairs() {
        let manager = CentroidManager::new(CentroidConfig::default(), 2);
        manager.folders.insert("a".to_string(), RwLock::new(FolderState::new_single_member(&[1.0, 0.0])));
        manager.folders.insert("b".to_string(), RwLock::new(FolderState::new_single_member(&[0.999, 0.001])));
        let pairs = manager.find_redundant_folders();
        assert_eq!(pairs.len(), 1);
    }
}
