//! Redundancy detection (§4.6): pairs of folders whose centroids have
//! drifted close enough together that they're plausibly the same topic.
//! Exposed as a first-class queryable operation rather than a side
//! computation — useful to the expansion-opportunity caller before it
//! proposes yet another near-duplicate folder.

use noteroute_core::model::FolderId;
use noteroute_vectormath::cosine;

/// A pair of folders flagged as redundant, with the centroid cosine that
/// triggered it.
#[derive(Debug, Clone, PartialEq)]
pub struct RedundantPair {
    pub a: FolderId,
    pub b: FolderId,
    pub similarity: f64,
}

/// All unordered pairs of `folders` whose centroid cosine is at or above
/// `threshold`.
pub fn find_redundant(folders: &[(FolderId, Vec<f32>)], threshold: f64) -> Vec<RedundantPair> {
    let mut pairs = Vec::new();
    for i in 0..folders.len() {
        for j in (i + 1)..folders.len() {
            let (id_a, centroid_a) = &folders[i];
            let (id_b, centroid_b) = &folders[j];
            let sim = cosine(centroid_a, centroid_b).unwrap_or(0.0);
            if sim >= threshold {
                pairs.push(RedundantPair { a: id_a.clone(), b: id_b.clone(), similarity: sim });
            }
        }
    }
    pairs.sort_by(|a, b| b.similarity.partial_cmp(&a.similarity).unwrap_or(std::cmp::Ordering::Equal));
    pairs
}
