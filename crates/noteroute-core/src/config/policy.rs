use serde::{Deserialize, Serialize};

use super::defaults;

/// Policy LLM add-on budget configuration (§6). Unused by the
/// deterministic `DecisionMaker`; consumed only by the optional
/// intelligent-folder add-on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PolicyConfig {
    pub daily_token_budget: u64,
    pub max_tokens_per_decision: u64,
    pub cache_timeout_secs: u64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            daily_token_budget: defaults::DEFAULT_DAILY_TOKEN_BUDGET,
            max_tokens_per_decision: defaults::DEFAULT_MAX_TOKENS_PER_DECISION,
            cache_timeout_secs: defaults::DEFAULT_POLICY_CACHE_TIMEOUT_SECS,
        }
    }
}

/// Per-capability timeouts (§5). A timeout at any stage surfaces as the
/// same `StageError(stage)` as any other failure at that stage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimeoutsConfig {
    pub distill_secs: u64,
    pub embed_secs: u64,
    pub index_secs: u64,
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            distill_secs: defaults::DEFAULT_DISTILL_TIMEOUT_SECS,
            embed_secs: defaults::DEFAULT_EMBED_TIMEOUT_SECS,
            index_secs: defaults::DEFAULT_INDEX_TIMEOUT_SECS,
        }
    }
}
