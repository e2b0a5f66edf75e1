use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Output of the (external) distillation capability: `{title, summary}`
/// plus provenance. `content_hash` is the SHA-256 of the normalized input
/// text and is the cache key for both distillation and embedding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DistilledContent {
    pub title: String,
    pub summary: String,
    pub content_hash: String,
    /// Whether this value was served from the distillation cache.
    pub cached: bool,
    pub distilled_at: DateTime<Utc>,
}

impl DistilledContent {
    /// SHA-256 of the normalized candidate text, hex-encoded.
    ///
    /// This is the single place the content hash is computed so that
    /// distillation and embedding always agree on the cache key.
    pub fn content_hash(normalized_text: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(normalized_text.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_hash_is_stable_for_equal_input() {
        let a = DistilledContent::content_hash("hello world");
        let b = DistilledContent::content_hash("hello world");
        assert_eq!(a, b);
    }

    #[test]
    fn content_hash_differs_for_different_input() {
        let a = DistilledContent::content_hash("hello world");
        let b = DistilledContent::content_hash("hello there");
        assert_ne!(a, b);
    }

    #[test]
    fn content_hash_is_64_hex_chars() {
        let h = DistilledContent::content_hash("anything");
        assert_eq!(h.len(), 64);
        assert!(h.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
