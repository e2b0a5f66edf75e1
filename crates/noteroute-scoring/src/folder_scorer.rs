//! C2 — FolderScorer (§4.2).
//!
//! `score = w_avg*avg(sim) + w_max*max(sim) + min(count*bonus_mult,
//! max_bonus)`. Pure and commutative over the input order — the count
//! bonus and the avg/max reductions don't care which position a
//! similarity arrived in, so permuting the input never changes the
//! result (§8 property 2).

use noteroute_core::config::FolderScoringConfig;
use noteroute_vectormath::{average_similarity, max_similarity};

/// Score one folder's group of concept similarities.
///
/// Returns `0.0` for an empty group.
pub fn score(similarities: &[f64], config: &FolderScoringConfig) -> f64 {
    if similarities.is_empty() {
        return 0.0;
    }
    let avg = average_similarity(similarities);
    let max = max_similarity(similarities);
    let count_bonus = (similarities.len() as f64 * config.bonus_mult).min(config.max_bonus);
    config.w_avg * avg + config.w_max * max + count_bonus
}
