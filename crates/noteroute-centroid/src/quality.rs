//! Folder quality metrics (§4.6): cohesion, separation, stability,
//! combined into an overall score by [`FolderQuality::combine`].

use noteroute_core::model::FolderQuality;
use noteroute_vectormath::cosine;

/// Mean cosine of every member to the folder's own centroid.
///
/// Returns `1.0` for a folder with no members — trivially cohesive,
/// matching [`noteroute_vectormath::coherence`]'s convention for small
/// sets.
pub fn cohesion(members: &[Vec<f32>], centroid: &[f32]) -> f64 {
    if members.is_empty() {
        return 1.0;
    }
    let total: f64 = members.iter().map(|m| cosine(m, centroid).unwrap_or(0.0)).sum();
    (total / members.len() as f64).clamp(0.0, 1.0)
}

/// `1 - max(cosine(centroid, other_centroid))` over every other known
/// folder. `1.0` (maximally separated) when there are no other folders.
pub fn separation(centroid: &[f32], other_centroids: &[Vec<f32>]) -> f64 {
    if other_centroids.is_empty() {
        return 1.0;
    }
    let max_sim = other_centroids
        .iter()
        .map(|c| cosine(centroid, c).unwrap_or(0.0))
        .fold(f64::NEG_INFINITY, f64::max);
    (1.0 - max_sim).clamp(0.0, 1.0)
}

/// `cosine(previous, current)` — how much the centroid moved between the
/// last full snapshot and now. `1.0` when there is no previous snapshot
/// yet (a brand-new folder is trivially stable).
pub fn stability(previous_centroid: Option<&[f32]>, current_centroid: &[f32]) -> f64 {
    match previous_centroid {
        Some(prev) if !prev.is_empty() => cosine(prev, current_centroid).unwrap_or(0.0).clamp(0.0, 1.0),
        _ => 1.0,
    }
}

/// Compute all four components in one call.
pub fn assess(
    members: &[Vec<f32>],
    centroid: &[f32],
    other_centroids: &[Vec<f32>],
    previous_centroid: Option<&[f32]>,
) -> FolderQuality {
    let c = cohesion(members, centroid);
    let s = separation(centroid, other_centroids);
    let st = stability(previous_centroid, centroid);
    FolderQuality::combine(c, s, st)
}
