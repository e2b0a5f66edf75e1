//! C9 — Router (§4.9): the facade callers talk to. Owns the long-lived
//! capability collaborators and the `CentroidManager`, builds a fresh
//! `Pipeline` borrow per call, and is the one place that turns a
//! decision into persisted state — `Pipeline::execute` itself stays a
//! pure read path (§A.5 idempotence).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use noteroute_core::cancellation::CancellationToken;
use noteroute_core::config::RoutingConfig;
use noteroute_core::constants::UNSORTED_FOLDER_ID;
use noteroute_core::errors::{ProviderError, RouterError, RouterResult, Stage};
use noteroute_core::model::{
    ClusterProposal, ConceptCandidate, FolderPlacement, FolderSuggestion, RoutingDecision,
};
use noteroute_core::traits::{DistillationProvider, EmbeddingProvider, UpsertRequest, VectorIndex};

use noteroute_centroid::{CentroidManager, RedundantPair};
use noteroute_pipeline::{detect_expansion_opportunity, ClusterMember, Pipeline, PipelineOutcome};

use crate::metrics::{MetricsCollector, RouterStats};

/// Result of routing a whole batch: one decision per input candidate, in
/// input order, plus whatever the clusterer found among the batch's
/// unsorted members (§A.5: `decisions[i]` corresponds to `candidates[i]`
/// regardless of execution order).
#[derive(Debug, Clone, Default)]
pub struct BatchRoutingResult {
    pub decisions: Vec<RoutingDecision>,
    pub cluster_proposals: Vec<ClusterProposal>,
    pub folder_suggestions: Vec<FolderSuggestion>,
}

/// The routing engine's single entry point. Cheap to share behind an
/// `Arc` across tasks; every method takes `&self`.
pub struct Router {
    distiller: Arc<dyn DistillationProvider>,
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
    centroid_manager: CentroidManager,
    config: RoutingConfig,
    metrics: MetricsCollector,
}

impl Router {
    /// Validate `config` and wire up a router over the three capability
    /// collaborators. `ConfigError` here is the only fatal error path
    /// (§A.7) — everything past construction returns through `route`.
    pub fn new(
        distiller: Arc<dyn DistillationProvider>,
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndex>,
        config: RoutingConfig,
    ) -> RouterResult<Self> {
        config.validate()?;
        let dimensions = index.dimensions();
        Ok(Self {
            distiller,
            embedder,
            index,
            centroid_manager: CentroidManager::new(config.centroid, dimensions),
            config,
            metrics: MetricsCollector::new(),
        })
    }

    fn pipeline(&self) -> Pipeline<'_> {
        Pipeline::new(
            &*self.distiller,
            &*self.embedder,
            &*self.index,
            &self.config.thresholds,
            &self.config.folder_scoring,
            &self.config.search_limits,
            &self.config.timeouts,
        )
    }

    /// Route one candidate to completion: DISTILL, EMBED, dedup, match,
    /// decide, then persist whatever the decision implies. Logs exactly
    /// one `info!` per call, at the terminal decision (§B.1) — every
    /// intermediate stage logs only at `debug!`/`warn!` inside the
    /// pipeline itself.
    pub async fn route(&self, candidate: &ConceptCandidate, cancel: &CancellationToken) -> RouterResult<RoutingDecision> {
        let outcome = self.pipeline().execute(candidate, cancel).await.map_err(|failure| failure.error)?;
        self.apply_side_effects(candidate, &outcome, cancel).await?;
        self.metrics.record(&outcome.decision);
        info!(
            candidate_id = %candidate.id,
            decision = outcome.decision.kind(),
            confidence = outcome.decision.confidence(),
            elapsed_ms = outcome.elapsed.as_millis() as u64,
            "router: terminal decision"
        );
        Ok(outcome.decision)
    }

    /// Route a whole batch sequentially, then run the clusterer over
    /// whichever members landed in `unsorted`. Sequential execution
    /// trivially satisfies the index-correspondence guarantee in §A.5;
    /// callers who need throughput beyond one candidate at a time can
    /// call `route` concurrently from multiple tasks against a shared
    /// `Arc<Router>` instead.
    pub async fn route_batch(&self, candidates: &[ConceptCandidate], cancel: &CancellationToken) -> RouterResult<BatchRoutingResult> {
        let mut decisions = Vec::with_capacity(candidates.len());
        let mut unsorted_members = Vec::new();

        for candidate in candidates {
            let outcome = self.pipeline().execute(candidate, cancel).await.map_err(|failure| failure.error)?;
            self.apply_side_effects(candidate, &outcome, cancel).await?;
            self.metrics.record(&outcome.decision);

            if matches!(outcome.decision, RoutingDecision::Unsorted { .. }) {
                unsorted_members.push(ClusterMember {
                    concept_id: candidate.id.clone(),
                    title: outcome.distilled.title.clone(),
                    context_vector: outcome.embeddings.context_vector.clone(),
                });
            }
            decisions.push(outcome.decision);
        }

        let (cluster_proposals, folder_suggestions) = if self.config.batch.enable_batch_clustering {
            let outcome = noteroute_pipeline::cluster(&unsorted_members, &self.config.clustering, &self.config.batch);
            (outcome.proposals, outcome.suggestions)
        } else {
            (Vec::new(), Vec::new())
        };

        Ok(BatchRoutingResult {
            decisions,
            cluster_proposals,
            folder_suggestions,
        })
    }

    /// Single-candidate expansion-opportunity check (§4.8): whether
    /// enough of `context_vector`'s "unsorted" neighbours justify
    /// proposing a new folder right now, instead of waiting for the next
    /// batch clustering pass.
    pub async fn check_expansion_opportunity(
        &self,
        candidate_id: &str,
        title: &str,
        context_vector: &[f32],
        cancel: &CancellationToken,
    ) -> RouterResult<Option<FolderSuggestion>> {
        let index_timeout = Duration::from_secs(self.config.timeouts.index_secs);
        match tokio::time::timeout(
            index_timeout,
            detect_expansion_opportunity(
                candidate_id,
                title,
                context_vector,
                &*self.index,
                &self.config.clustering,
                self.config.batch.min_cluster_size,
                cancel,
            ),
        )
        .await
        {
            Ok(Ok(suggestion)) => Ok(suggestion),
            Ok(Err(e)) => Err(RouterError::stage(Stage::Route, e)),
            Err(_) => Err(RouterError::stage(
                Stage::Route,
                ProviderError::timeout(format!("expansion search exceeded {index_timeout:?}")),
            )),
        }
    }

    /// Rolling routing statistics (§B.5).
    pub fn stats(&self) -> RouterStats {
        self.metrics.stats()
    }

    /// Test/ops hook: zero every rolling statistic.
    pub fn reset_stats(&self) {
        self.metrics.reset();
    }

    /// Folder pairs whose centroids have drifted close enough to be
    /// plausibly redundant — exposed for callers driving folder merges.
    pub fn redundant_folders(&self) -> Vec<RedundantPair> {
        self.centroid_manager.find_redundant_folders()
    }

    async fn apply_side_effects(&self, candidate: &ConceptCandidate, outcome: &PipelineOutcome, cancel: &CancellationToken) -> RouterResult<()> {
        match &outcome.decision {
            RoutingDecision::Route { placement, .. } => {
                self.persist(candidate, outcome, placement.clone(), cancel).await?;
                self.centroid_manager
                    .add_member(&placement.primary, &outcome.embeddings.context_vector, &*self.index, cancel)
                    .await?;
            }
            RoutingDecision::Unsorted { confidence, .. } => {
                let mut confidences = HashMap::new();
                confidences.insert(UNSORTED_FOLDER_ID.to_string(), *confidence);
                let placement = FolderPlacement::new(UNSORTED_FOLDER_ID.to_string(), vec![], confidences)
                    .expect("unsorted-only placement always satisfies the placement invariants");
                self.persist(candidate, outcome, placement, cancel).await?;
                self.centroid_manager
                    .add_member(&UNSORTED_FOLDER_ID.to_string(), &outcome.embeddings.context_vector, &*self.index, cancel)
                    .await?;
            }
            RoutingDecision::Duplicate { .. } => {
                debug!(candidate_id = %candidate.id, "router: duplicate decision, nothing new persisted");
            }
            RoutingDecision::Review { .. } => {
                debug!(candidate_id = %candidate.id, "router: ambiguous decision held for manual review, nothing persisted yet");
            }
            RoutingDecision::CreateFolder { .. } => {
                debug!(candidate_id = %candidate.id, "router: create_folder decisions come from batch/expansion flows, not the per-candidate pipeline");
            }
        }
        Ok(())
    }

    async fn persist(&self, candidate: &ConceptCandidate, outcome: &PipelineOutcome, placement: FolderPlacement, cancel: &CancellationToken) -> RouterResult<()> {
        self.index
            .upsert(
                UpsertRequest {
                    concept_id: candidate.id.clone(),
                    embeddings: outcome.embeddings.clone(),
                    placement,
                },
                cancel,
            )
            .await
            .map_err(|e| RouterError::stage(Stage::Route, e))
    }
}
