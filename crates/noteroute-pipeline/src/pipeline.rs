//! C7 — Pipeline (§4.7): DISTILL -> EMBED -> dedup -> match -> decide,
//! single-threaded per candidate. Side effects (index upsert, centroid
//! update) are the caller's responsibility, requested only after a
//! decision is made (§5 idempotence) — this stays a read path throughout.

use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{debug, warn};

use noteroute_core::cancellation::CancellationToken;
use noteroute_core::config::{FolderScoringConfig, RoutingThresholds, SearchLimitsConfig, TimeoutsConfig};
use noteroute_core::errors::{ProviderError, RouterError, Stage};
use noteroute_core::model::{
    ConceptCandidate, DecisionExplanation, DecisionFactor, DistilledContent, PrimarySignal, RoutingDecision,
    VectorEmbeddings,
};
use noteroute_core::traits::{DistillationProvider, EmbeddingProvider, VectorIndex};

use noteroute_scoring::{decide, detect_duplicate, match_folders};

/// A successful pipeline run: the decision plus every intermediate
/// artifact, for the caller to persist or discard.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub decision: RoutingDecision,
    pub distilled: DistilledContent,
    pub embeddings: VectorEmbeddings,
    pub elapsed: Duration,
}

/// A failed pipeline run. `elapsed` is reported on every result,
/// including error paths (§4.7).
#[derive(Debug, Clone)]
pub struct PipelineFailure {
    pub error: RouterError,
    pub elapsed: Duration,
}

pub type PipelineResult = Result<PipelineOutcome, PipelineFailure>;

/// Borrowed references to the five capability collaborators and the
/// config slices one pipeline run needs. Constructed fresh per call by
/// the router facade, which owns the long-lived trait objects.
pub struct Pipeline<'a> {
    distiller: &'a dyn DistillationProvider,
    embedder: &'a dyn EmbeddingProvider,
    index: &'a dyn VectorIndex,
    thresholds: &'a RoutingThresholds,
    folder_scoring: &'a FolderScoringConfig,
    search_limits: &'a SearchLimitsConfig,
    timeouts: &'a TimeoutsConfig,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        distiller: &'a dyn DistillationProvider,
        embedder: &'a dyn EmbeddingProvider,
        index: &'a dyn VectorIndex,
        thresholds: &'a RoutingThresholds,
        folder_scoring: &'a FolderScoringConfig,
        search_limits: &'a SearchLimitsConfig,
        timeouts: &'a TimeoutsConfig,
    ) -> Self {
        Self {
            distiller,
            embedder,
            index,
            thresholds,
            folder_scoring,
            search_limits,
            timeouts,
        }
    }

    /// Run one candidate through every stage. Stage order is fixed:
    /// distill precedes embed precedes dedup precedes match precedes
    /// decide — no reordering (§5).
    pub async fn execute(&self, candidate: &ConceptCandidate, cancel: &CancellationToken) -> PipelineResult {
        let start = Instant::now();
        let normalized = candidate.normalize();

        let distilled = match self.run_distill(&normalized, cancel).await {
            Ok(d) => d,
            Err(e) => {
                return Err(PipelineFailure {
                    error: RouterError::stage(Stage::Distill, e),
                    elapsed: start.elapsed(),
                })
            }
        };
        debug!(candidate_id = %candidate.id, stage = "distill", cached = distilled.cached, "pipeline stage complete");

        let embeddings = match self.run_embed(&distilled, cancel).await {
            Ok(e) => e,
            Err(e) => {
                return Err(PipelineFailure {
                    error: RouterError::stage(Stage::Embed, e),
                    elapsed: start.elapsed(),
                })
            }
        };
        debug!(candidate_id = %candidate.id, stage = "embed", cached = embeddings.cached, "pipeline stage complete");

        let index_timeout = Duration::from_secs(self.timeouts.index_secs);

        let duplicate_hit = match tokio::time::timeout(
            index_timeout,
            detect_duplicate(self.index, &embeddings.title_vector, self.thresholds.duplicate, cancel),
        )
        .await
        {
            Ok(hit) => hit,
            Err(_) => {
                warn!(candidate_id = %candidate.id, "pipeline: duplicate detector timed out, treating as no duplicate");
                None
            }
        };
        debug!(candidate_id = %candidate.id, stage = "dedup", hit = duplicate_hit.is_some(), "pipeline stage complete");

        if let Some(hit) = duplicate_hit {
            let pct = (hit.similarity * 100.0).round() as i64;
            let decision = RoutingDecision::Duplicate {
                duplicate_id: hit.duplicate_id,
                confidence: hit.similarity,
                explanation: DecisionExplanation {
                    primary_signal: PrimarySignal::AboveDuplicateThreshold,
                    similar_concepts: vec![],
                    factors: vec![DecisionFactor {
                        description: format!(
                            "title vector similarity {:.4} crossed duplicate threshold {:.4}",
                            hit.similarity, self.thresholds.duplicate
                        ),
                    }],
                    top_folder_matches: vec![],
                    summary: format!("Duplicate of existing concept ({pct}% similar)"),
                },
                timestamp: Utc::now(),
            };
            return Ok(PipelineOutcome {
                decision,
                distilled,
                embeddings,
                elapsed: start.elapsed(),
            });
        }

        let matches = match tokio::time::timeout(
            index_timeout,
            match_folders(
                self.index,
                &embeddings.context_vector,
                self.thresholds.low_confidence,
                self.search_limits.context_search_limit,
                self.folder_scoring,
                cancel,
            ),
        )
        .await
        {
            Ok(Ok(matches)) => matches,
            Ok(Err(e)) => {
                return Err(PipelineFailure {
                    error: RouterError::stage(Stage::Route, e),
                    elapsed: start.elapsed(),
                })
            }
            Err(_) => {
                return Err(PipelineFailure {
                    error: RouterError::stage(
                        Stage::Route,
                        ProviderError::timeout(format!("context search exceeded {index_timeout:?}")),
                    ),
                    elapsed: start.elapsed(),
                })
            }
        };
        debug!(candidate_id = %candidate.id, stage = "match", candidate_folders = matches.len(), "pipeline stage complete");

        let decision = decide(&matches, self.thresholds, Utc::now());
        debug!(candidate_id = %candidate.id, stage = "decide", kind = decision.kind(), "pipeline stage complete");

        Ok(PipelineOutcome {
            decision,
            distilled,
            embeddings,
            elapsed: start.elapsed(),
        })
    }

    async fn run_distill(&self, normalized: &str, cancel: &CancellationToken) -> Result<DistilledContent, ProviderError> {
        let duration = Duration::from_secs(self.timeouts.distill_secs);
        match tokio::time::timeout(duration, self.distiller.distill(normalized, cancel)).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::timeout(format!("distill exceeded {duration:?}"))),
        }
    }

    async fn run_embed(&self, distilled: &DistilledContent, cancel: &CancellationToken) -> Result<VectorEmbeddings, ProviderError> {
        let duration = Duration::from_secs(self.timeouts.embed_secs);
        match tokio::time::timeout(duration, self.embedder.embed(distilled, cancel)).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::timeout(format!("embed exceeded {duration:?}"))),
        }
    }
}
