use async_trait::async_trait;

use crate::cancellation::CancellationToken;
use crate::errors::ProviderError;
use crate::model::{DistilledContent, VectorEmbeddings};

/// Embedding provider: `DistilledContent -> VectorEmbeddings` (§6).
/// Dimensions are fixed per model; a mismatch against the index's
/// configured dimensions is a fatal `RouterError::DimensionMismatch`
/// raised by the caller, not by this trait.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed distilled content, producing both title and context
    /// vectors.
    async fn embed(
        &self,
        distilled: &DistilledContent,
        cancel: &CancellationToken,
    ) -> Result<VectorEmbeddings, ProviderError>;

    /// Dimensionality this provider's model produces.
    fn dimensions(&self) -> usize;

    /// Human-readable model identifier, carried onto `VectorEmbeddings::model`.
    fn model_name(&self) -> &str;
}
