//! C3 — DuplicateDetector (§4.3).
//!
//! A non-fatal short-circuit: a title-vector search against the index,
//! top-1 above the duplicate threshold. Any index failure here is logged
//! and treated as "no duplicate" — the pipeline always continues to the
//! route stage on a detector error (§4.3, §7).

use noteroute_core::cancellation::CancellationToken;
use noteroute_core::traits::{SearchParams, VectorIndex};
use tracing::warn;

/// A duplicate hit: the existing concept id and the similarity that
/// triggered it.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateHit {
    pub duplicate_id: String,
    pub similarity: f64,
}

/// Look for a near-identical concept already in the index.
///
/// Queries `index.search_by_title` for the single best match above
/// `threshold`. On index failure, logs a warning and returns `None` —
/// per §4.3 this stage never fails the pipeline.
pub async fn detect(
    index: &dyn VectorIndex,
    title_vector: &[f32],
    threshold: f64,
    cancel: &CancellationToken,
) -> Option<DuplicateHit> {
    let params = SearchParams { threshold, limit: 1 };
    match index.search_by_title(title_vector, params, cancel).await {
        Ok(hits) => hits.first().map(|hit| DuplicateHit {
            duplicate_id: hit.concept_id.clone(),
            similarity: hit.similarity,
        }),
        Err(err) => {
            warn!(error = %err, "duplicate detector: title search failed, treating as no duplicate");
            None
        }
    }
}
