use serde::{Deserialize, Serialize};

use super::defaults;

/// Batch clustering configuration (§4.8).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BatchConfig {
    /// Clusters smaller than this are dropped (or routed together, never
    /// promoted to `create_folder`).
    pub min_cluster_size: usize,
    pub enable_batch_clustering: bool,
    pub enable_folder_creation: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            min_cluster_size: defaults::DEFAULT_MIN_CLUSTER_SIZE,
            enable_batch_clustering: defaults::DEFAULT_ENABLE_BATCH_CLUSTERING,
            enable_folder_creation: defaults::DEFAULT_ENABLE_FOLDER_CREATION,
        }
    }
}

/// Clustering thresholds and limits (§4.8, §8 expansion opportunity).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClusteringConfig {
    pub cluster_similarity_threshold: f64,
    pub unsorted_similarity_threshold: f64,
    pub unsorted_search_limit: usize,
    pub max_cluster_size: usize,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            cluster_similarity_threshold: defaults::DEFAULT_CLUSTER_SIMILARITY_THRESHOLD,
            unsorted_similarity_threshold: defaults::DEFAULT_UNSORTED_SIMILARITY_THRESHOLD,
            unsorted_search_limit: defaults::DEFAULT_UNSORTED_SEARCH_LIMIT,
            max_cluster_size: defaults::DEFAULT_MAX_CLUSTER_SIZE,
        }
    }
}

/// Vector search limits (§6) for title and context search calls.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchLimitsConfig {
    pub title_search_limit: usize,
    pub context_search_limit: usize,
}

impl Default for SearchLimitsConfig {
    fn default() -> Self {
        Self {
            title_search_limit: defaults::DEFAULT_TITLE_SEARCH_LIMIT,
            context_search_limit: defaults::DEFAULT_CONTEXT_SEARCH_LIMIT,
        }
    }
}
