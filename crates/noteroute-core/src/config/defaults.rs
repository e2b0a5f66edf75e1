// Single source of truth for all default values (§6 of the spec).

// --- Routing thresholds ---
pub const DEFAULT_HIGH_CONFIDENCE: f64 = 0.82;
pub const DEFAULT_LOW_CONFIDENCE: f64 = 0.65;
pub const DEFAULT_NEW_TOPIC: f64 = 0.50;
pub const DEFAULT_DUPLICATE: f64 = 0.95;
pub const DEFAULT_FOLDER_PLACEMENT: f64 = 0.70;
pub const DEFAULT_CROSS_LINK_DELTA: f64 = 0.10;
pub const DEFAULT_CROSS_LINK_MIN: f64 = 0.55;

// --- Folder scoring ---
pub const DEFAULT_W_AVG: f64 = 0.6;
pub const DEFAULT_W_MAX: f64 = 0.2;
pub const DEFAULT_BONUS_MULT: f64 = 0.1;
pub const DEFAULT_MAX_BONUS: f64 = 0.3;

// --- Batch / clustering ---
pub const DEFAULT_MIN_CLUSTER_SIZE: usize = 3;
pub const DEFAULT_ENABLE_BATCH_CLUSTERING: bool = true;
pub const DEFAULT_ENABLE_FOLDER_CREATION: bool = true;
pub const DEFAULT_CLUSTER_SIMILARITY_THRESHOLD: f64 = 0.7;
pub const DEFAULT_UNSORTED_SIMILARITY_THRESHOLD: f64 = 0.72;
pub const DEFAULT_UNSORTED_SEARCH_LIMIT: usize = 50;
pub const DEFAULT_MAX_CLUSTER_SIZE: usize = 200;

// --- Vector search limits ---
pub const DEFAULT_TITLE_SEARCH_LIMIT: usize = 1;
pub const DEFAULT_CONTEXT_SEARCH_LIMIT: usize = 50;

// --- Centroid manager ---
pub const DEFAULT_EXEMPLAR_COUNT: usize = 5;
pub const DEFAULT_INCREMENTAL_THRESHOLD: usize = 32;
pub const DEFAULT_STABILITY_FLOOR: f64 = 0.5;
pub const DEFAULT_REDUNDANCY_THRESHOLD: f64 = 0.9;
pub const DEFAULT_CONTEXT_TOKEN_BUDGET: usize = 4_000;
pub const DEFAULT_TOKENS_PER_FOLDER: usize = 120;
pub const DEFAULT_CONTEXT_SIMILARITY_FLOOR: f64 = 0.3;
pub const DEFAULT_BOOTSTRAP_MAX_FOLDERS: usize = 3;
pub const DEFAULT_BOOTSTRAP_MEMBER_CEILING: usize = 20;
pub const DEFAULT_GROWING_MEMBER_CEILING: usize = 200;

// --- Policy LLM add-on ---
pub const DEFAULT_DAILY_TOKEN_BUDGET: u64 = 200_000;
pub const DEFAULT_MAX_TOKENS_PER_DECISION: u64 = 2_000;
pub const DEFAULT_POLICY_CACHE_TIMEOUT_SECS: u64 = 300;

// --- Capability timeouts (§5) ---
pub const DEFAULT_DISTILL_TIMEOUT_SECS: u64 = 45;
pub const DEFAULT_EMBED_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_INDEX_TIMEOUT_SECS: u64 = 10;
