use async_trait::async_trait;

use crate::cancellation::CancellationToken;
use crate::config::SystemPhase;
use crate::errors::RouterError;
use crate::model::{ConceptCandidate, FolderMatch, RoutingDecision};

/// Optional add-on used only by the intelligent-folder layer, never by
/// the base `DecisionMaker` (§6, §9). When unavailable or over budget,
/// callers fall back cleanly to the deterministic decision.
#[async_trait]
pub trait PolicyLlm: Send + Sync {
    /// Produce a structured decision that may override or enrich the
    /// deterministic `DecisionMaker` result for `candidate`.
    ///
    /// `RouterError::BudgetExceeded` is the only error variant this
    /// trait is expected to return in the steady state; any other error
    /// is treated the same way by callers (fall back to
    /// `deterministic`).
    async fn decide(
        &self,
        candidate: &ConceptCandidate,
        folder_context: &[FolderMatch],
        phase: SystemPhase,
        deterministic: &RoutingDecision,
        cancel: &CancellationToken,
    ) -> Result<RoutingDecision, RouterError>;
}
