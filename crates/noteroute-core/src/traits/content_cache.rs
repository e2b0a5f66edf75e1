use async_trait::async_trait;
use std::time::Duration;

use crate::model::{DistilledContent, VectorEmbeddings};

/// Either of the two cacheable artifacts keyed by `content_hash` (§3).
#[derive(Debug, Clone, PartialEq)]
pub enum CachedContent {
    Distilled(DistilledContent),
    Embeddings(VectorEmbeddings),
}

/// Point-in-time counters for cache observability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: u64,
}

/// Content-hash-keyed cache for distillation and embedding results
/// (§6). A performance capability only: the core remains correct when
/// it is disabled (always misses).
#[async_trait]
pub trait ContentCache: Send + Sync {
    /// Fetch a cached artifact; `None` on miss (never errors).
    async fn get(&self, content_hash: &str) -> Option<CachedContent>;

    /// Store an artifact with a time-to-live.
    async fn set(&self, content_hash: &str, content: CachedContent, ttl: Duration);

    /// Whether a (non-expired) entry exists for `content_hash`.
    async fn has(&self, content_hash: &str) -> bool;

    /// Evict a single entry.
    async fn delete(&self, content_hash: &str);

    /// Evict everything.
    async fn clear(&self);

    /// Point-in-time hit/miss/size counters.
    fn stats(&self) -> CacheStats;
}
