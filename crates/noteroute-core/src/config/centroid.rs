use serde::{Deserialize, Serialize};

use super::defaults;

/// Exemplar selection strategy (§4.6).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ExemplarStrategy {
    #[default]
    Diverse,
    Boundary,
    Medoid,
    Hybrid,
}

/// System phase, controlling `CentroidManager` context-filtering policy
/// (§4.6, glossary).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SystemPhase {
    Bootstrap,
    Growing,
    Mature,
}

/// `CentroidManager` configuration: exemplar count/strategy, quality
/// floors, incremental-update threshold, and context token budget.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CentroidConfig {
    pub exemplar_count: usize,
    pub exemplar_strategy: ExemplarStrategy,
    /// Member-count delta since the last full recompute beyond which an
    /// incremental update is abandoned in favour of a full recompute.
    pub incremental_threshold: usize,
    /// Stability floor below which a full recompute is forced even if
    /// `incremental_threshold` hasn't been crossed.
    pub stability_floor: f64,
    /// Centroid cosine at/above which two folders are flagged redundant.
    pub redundancy_threshold: f64,
    pub context_token_budget: usize,
    pub tokens_per_folder: usize,
    pub context_similarity_floor: f64,
    /// Hard cap on folders surfaced during `bootstrap` phase, to force
    /// diversity while the index has few members.
    pub bootstrap_max_folders: usize,
}

impl Default for CentroidConfig {
    fn default() -> Self {
        Self {
            exemplar_count: defaults::DEFAULT_EXEMPLAR_COUNT,
            exemplar_strategy: ExemplarStrategy::default(),
            incremental_threshold: defaults::DEFAULT_INCREMENTAL_THRESHOLD,
            stability_floor: defaults::DEFAULT_STABILITY_FLOOR,
            redundancy_threshold: defaults::DEFAULT_REDUNDANCY_THRESHOLD,
            context_token_budget: defaults::DEFAULT_CONTEXT_TOKEN_BUDGET,
            tokens_per_folder: defaults::DEFAULT_TOKENS_PER_FOLDER,
            context_similarity_floor: defaults::DEFAULT_CONTEXT_SIMILARITY_FLOOR,
            bootstrap_max_folders: defaults::DEFAULT_BOOTSTRAP_MAX_FOLDERS,
        }
    }
}
