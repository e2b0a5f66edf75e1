use async_trait::async_trait;

use crate::cancellation::CancellationToken;
use crate::errors::ProviderError;
use crate::model::DistilledContent;

/// LLM-based text distillation: canonicalised text in, `{title, summary,
/// content_hash}` out (§6). Out of scope here is the prompt itself — the
/// core depends only on this contract.
#[async_trait]
pub trait DistillationProvider: Send + Sync {
    /// Distill one canonical text. Must be safe to call concurrently and
    /// must surface its own cache-hit flag on the returned content.
    async fn distill(
        &self,
        canonical_text: &str,
        cancel: &CancellationToken,
    ) -> Result<DistilledContent, ProviderError>;
}
