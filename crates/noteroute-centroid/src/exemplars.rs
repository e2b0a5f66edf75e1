//! Exemplar selection strategies (§4.6): pick `k` member vectors to stand
//! in for a folder in fast similarity comparisons, without holding every
//! member in memory.

use noteroute_core::config::ExemplarStrategy;
use noteroute_vectormath::cosine;

/// Select up to `k` exemplars from `members` relative to `centroid`,
/// using `strategy`. Returns fewer than `k` if `members.len() < k`.
pub fn select(members: &[Vec<f32>], centroid: &[f32], k: usize, strategy: ExemplarStrategy) -> Vec<Vec<f32>> {
    if members.is_empty() || k == 0 {
        return Vec::new();
    }
    match strategy {
        ExemplarStrategy::Medoid => medoid_order(members, centroid).into_iter().take(k).collect(),
        ExemplarStrategy::Boundary => boundary_order(members, centroid).into_iter().take(k).collect(),
        ExemplarStrategy::Diverse => diverse(members, centroid, k),
        ExemplarStrategy::Hybrid => hybrid(members, centroid, k),
    }
}

fn similarity_to_centroid(members: &[Vec<f32>], centroid: &[f32]) -> Vec<f64> {
    members.iter().map(|m| cosine(m, centroid).unwrap_or(0.0)).collect()
}

/// Members nearest the centroid first — repeatedly taking the nearest
/// remaining member after conceptually removing the last pick (§4.6
/// medoid).
fn medoid_order(members: &[Vec<f32>], centroid: &[f32]) -> Vec<Vec<f32>> {
    let sims = similarity_to_centroid(members, centroid);
    let mut idx: Vec<usize> = (0..members.len()).collect();
    idx.sort_by(|&a, &b| sims[b].partial_cmp(&sims[a]).unwrap_or(std::cmp::Ordering::Equal));
    idx.into_iter().map(|i| members[i].clone()).collect()
}

/// Members farthest from the centroid first (§4.6 boundary).
fn boundary_order(members: &[Vec<f32>], centroid: &[f32]) -> Vec<Vec<f32>> {
    let sims = similarity_to_centroid(members, centroid);
    let mut idx: Vec<usize> = (0..members.len()).collect();
    idx.sort_by(|&a, &b| sims[a].partial_cmp(&sims[b]).unwrap_or(std::cmp::Ordering::Equal));
    idx.into_iter().map(|i| members[i].clone()).collect()
}

/// Farthest-first traversal seeded by the medoid (§4.6 diverse): start
/// from the most representative member, then repeatedly add whichever
/// remaining member is least similar to every member already picked.
fn diverse(members: &[Vec<f32>], centroid: &[f32], k: usize) -> Vec<Vec<f32>> {
    let sims = similarity_to_centroid(members, centroid);
    let seed = sims
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0);

    let mut picked = vec![seed];
    let mut remaining: Vec<usize> = (0..members.len()).filter(|&i| i != seed).collect();

    while picked.len() < k && !remaining.is_empty() {
        let mut best_idx = 0;
        let mut best_min_sim = f64::INFINITY;
        for (pos, &candidate) in remaining.iter().enumerate() {
            let min_sim = picked
                .iter()
                .map(|&p| cosine(&members[candidate], &members[p]).unwrap_or(0.0))
                .fold(f64::INFINITY, f64::min);
            if min_sim < best_min_sim {
                best_min_sim = min_sim;
                best_idx = pos;
            }
        }
        picked.push(remaining.remove(best_idx));
    }

    picked.into_iter().map(|i| members[i].clone()).collect()
}

/// Half medoid, half diverse, deduplicated while preserving order
/// (§4.6 hybrid).
fn hybrid(members: &[Vec<f32>], centroid: &[f32], k: usize) -> Vec<Vec<f32>> {
    let half = k.div_ceil(2);
    let from_medoid = medoid_order(members, centroid);
    let from_diverse = diverse(members, centroid, k);

    let mut picked: Vec<Vec<f32>> = Vec::with_capacity(k);
    for v in from_medoid.into_iter().take(half) {
        if !picked.contains(&v) {
            picked.push(v);
        }
    }
    for v in from_diverse {
        if picked.len() >= k {
            break;
        }
        if !picked.contains(&v) {
            picked.push(v);
        }
    }
    picked.truncate(k);
    picked
}
