//! C5 — DecisionMaker (§4.5), the core routing state machine.
//!
//! Pure function: `(matches, thresholds) -> RoutingDecision`. No I/O, no
//! clock dependency beyond the `now` the caller supplies — given the same
//! inputs it produces byte-identical output every time (§8 property 1).

use chrono::{DateTime, Utc};

use noteroute_core::config::RoutingThresholds;
use noteroute_core::constants::{MAX_EXPLANATION_CONCEPTS, MAX_EXPLANATION_FOLDER_MATCHES, MAX_PLACEMENTS};
use noteroute_core::model::{
    DecisionExplanation, DecisionFactor, FolderMatch, FolderMatchSummary, FolderPlacement, PrimarySignal,
    RoutingDecision, SimilarConcept,
};

use std::collections::HashMap;

/// Decide a routing outcome for one candidate's scored folder matches.
///
/// `matches` must already be sorted descending by score (as produced by
/// [`crate::folder_matcher::match_folders`]); this function does not
/// re-sort, since re-deriving the sort here would duplicate the tie-break
/// rule in two places.
pub fn decide(matches: &[FolderMatch], thresholds: &RoutingThresholds, now: DateTime<Utc>) -> RoutingDecision {
    let best = matches.first();
    let score = best.map(|m| m.score).unwrap_or(0.0);

    if best.is_none() || score < thresholds.new_topic {
        let signal = if best.is_none() {
            PrimarySignal::NoMatches
        } else {
            PrimarySignal::BelowNewTopic
        };
        return RoutingDecision::Unsorted {
            confidence: score,
            explanation: explain(signal, matches, score, thresholds, "No folder matched confidently enough"),
            timestamp: now,
        };
    }

    let best = best.expect("checked above");

    if score >= thresholds.duplicate {
        // The context-vector safety net (§9): a near-identical concept
        // surfaced through ordinary folder matching rather than the
        // title-vector short-circuit in `duplicate_detector`.
        let duplicate_id = best
            .similar_concepts
            .first()
            .map(|(id, _)| id.clone())
            .unwrap_or_else(|| best.folder_id.clone());
        let pct = (score * 100.0).round() as i64;
        return RoutingDecision::Duplicate {
            duplicate_id,
            confidence: score,
            explanation: explain(
                PrimarySignal::AboveDuplicateThreshold,
                matches,
                score,
                thresholds,
                &format!("Duplicate of existing concept ({pct}% similar)"),
            ),
            timestamp: now,
        };
    }

    if score >= thresholds.high_confidence {
        let placement = build_placement(best, &matches[1..], thresholds);
        let summary = format!("Routed to folder '{}' with high confidence", best.folder_id);
        return RoutingDecision::Route {
            placement,
            confidence: score,
            explanation: explain(PrimarySignal::AboveHighConfidence, matches, score, thresholds, &summary),
            timestamp: now,
        };
    }

    if score >= thresholds.low_confidence {
        return RoutingDecision::Review {
            confidence: score,
            explanation: explain(
                PrimarySignal::AboveLowConfidence,
                matches,
                score,
                thresholds,
                "Ambiguous match requires manual review",
            ),
            timestamp: now,
        };
    }

    RoutingDecision::Unsorted {
        confidence: score,
        explanation: explain(
            PrimarySignal::BelowLowConfidence,
            matches,
            score,
            thresholds,
            "No folder matched confidently enough",
        ),
        timestamp: now,
    }
}

/// Multi-folder placement (§4.5, Route only): cross-link every
/// subsequent match that clears `folder_placement` and stays within
/// `cross_link_delta` of the primary's score. Lower-confidence
/// "alternative" matches (those only clearing `cross_link_min`) are
/// surfaced in the explanation's `top_folder_matches` but are
/// deliberately not added to `references` — §8 property 7 asserts the
/// placement invariant over every referenced folder, and folding in a
/// laxer-threshold alternative would violate it for matches that pass
/// `cross_link_min` but fail `folder_placement` or the delta bound.
fn build_placement(best: &FolderMatch, rest: &[FolderMatch], thresholds: &RoutingThresholds) -> FolderPlacement {
    let mut confidences: HashMap<String, f64> = HashMap::new();
    confidences.insert(best.folder_id.clone(), best.score);

    let mut references = Vec::new();
    for candidate in rest {
        if references.len() + 1 >= MAX_PLACEMENTS {
            break;
        }
        let clears_floor = candidate.score >= thresholds.folder_placement;
        let within_delta = best.score - candidate.score <= thresholds.cross_link_delta;
        if clears_floor && within_delta {
            references.push(candidate.folder_id.clone());
            confidences.insert(candidate.folder_id.clone(), candidate.score);
        }
    }

    FolderPlacement::new(best.folder_id.clone(), references, confidences)
        .expect("build_placement constructs a placement satisfying its own invariants by construction")
}

fn explain(
    primary_signal: PrimarySignal,
    matches: &[FolderMatch],
    score: f64,
    thresholds: &RoutingThresholds,
    summary: &str,
) -> DecisionExplanation {
    let similar_concepts: Vec<SimilarConcept> = matches
        .first()
        .map(|m| {
            m.similar_concepts
                .iter()
                .take(MAX_EXPLANATION_CONCEPTS)
                .map(|(id, sim)| SimilarConcept {
                    concept_id: id.clone(),
                    similarity: *sim,
                })
                .collect()
        })
        .unwrap_or_default();

    let top_folder_matches: Vec<FolderMatchSummary> = matches
        .iter()
        .take(MAX_EXPLANATION_FOLDER_MATCHES)
        .map(|m| FolderMatchSummary {
            folder_id: m.folder_id.clone(),
            score: m.score,
        })
        .collect();

    let mut factors = vec![DecisionFactor {
        description: format!("best folder score {score:.4} across {} candidate folder(s)", matches.len()),
    }];
    for (name, value) in [
        ("duplicate", thresholds.duplicate),
        ("high_confidence", thresholds.high_confidence),
        ("low_confidence", thresholds.low_confidence),
        ("new_topic", thresholds.new_topic),
    ] {
        if score >= value {
            factors.push(DecisionFactor {
                description: format!("score {score:.4} crossed {name} ({value:.4})"),
            });
        }
    }

    DecisionExplanation {
        primary_signal,
        similar_concepts,
        factors,
        top_folder_matches,
        summary: summary.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> RoutingThresholds {
        RoutingThresholds {
            high_confidence: 0.82,
            low_confidence: 0.65,
            new_topic: 0.50,
            duplicate: 0.95,
            folder_placement: 0.70,
            cross_link_delta: 0.10,
            cross_link_min: 0.55,
        }
    }

    fn fmatch(folder_id: &str, score: f64, concepts: &[(&str, f64)]) -> FolderMatch {
        FolderMatch {
            folder_id: folder_id.into(),
            score,
            concept_count: concepts.len(),
            similar_concepts: concepts.iter().map(|(id, s)| (id.to_string(), *s)).collect(),
        }
    }

    #[test]
    fn s2_high_confidence_route() {
        let matches = vec![fmatch("ml-folder", 0.874, &[("c1", 0.85), ("c2", 0.83)])];
        let decision = decide(&matches, &thresholds(), Utc::now());
        match decision {
            RoutingDecision::Route { placement, confidence, .. } => {
                assert_eq!(placement.primary, "ml-folder");
                assert!((confidence - 0.874).abs() < 1e-9);
            }
            other => panic!("expected Route, got {other:?}"),
        }
    }

    #[test]
    fn s3_multi_folder_placement() {
        let matches = vec![fmatch("A", 0.80, &[("c1", 0.80)]), fmatch("B", 0.78, &[("c2", 0.78)])];
        let decision = decide(&matches, &thresholds(), Utc::now());
        match decision {
            RoutingDecision::Route { placement, .. } => {
                assert_eq!(placement.primary, "A");
                assert_eq!(placement.references, vec!["B".to_string()]);
            }
            other => panic!("expected Route, got {other:?}"),
        }
    }

    #[test]
    fn s4_review_band() {
        let matches = vec![fmatch("X", 0.70, &[("c1", 0.70)])];
        let decision = decide(&matches, &thresholds(), Utc::now());
        match decision {
            RoutingDecision::Review { confidence, explanation, .. } => {
                assert!((confidence - 0.70).abs() < 1e-9);
                assert_eq!(explanation.summary, "Ambiguous match requires manual review");
            }
            other => panic!("expected Review, got {other:?}"),
        }
    }

    #[test]
    fn s5_unsorted_below_new_topic() {
        let matches = vec![fmatch("X", 0.30, &[("c1", 0.30)])];
        let decision = decide(&matches, &thresholds(), Utc::now());
        match decision {
            RoutingDecision::Unsorted { confidence, .. } => assert!((confidence - 0.30).abs() < 1e-9),
            other => panic!("expected Unsorted, got {other:?}"),
        }
    }

    #[test]
    fn s1_duplicate_via_safety_net() {
        let matches = vec![fmatch("ml-folder", 1.0, &[("c0", 1.0)])];
        let decision = decide(&matches, &thresholds(), Utc::now());
        match decision {
            RoutingDecision::Duplicate { duplicate_id, confidence, explanation, .. } => {
                assert_eq!(duplicate_id, "c0");
                assert_eq!(confidence, 1.0);
                assert_eq!(explanation.summary, "Duplicate of existing concept (100% similar)");
            }
            other => panic!("expected Duplicate, got {other:?}"),
        }
    }

    #[test]
    fn no_matches_is_unsorted() {
        let decision = decide(&[], &thresholds(), Utc::now());
        assert!(matches!(decision, RoutingDecision::Unsorted { .. }));
    }

    #[test]
    fn fall_through_band_between_new_topic_and_low_confidence_is_unsorted() {
        let matches = vec![fmatch("X", 0.55, &[("c1", 0.55)])];
        let decision = decide(&matches, &thresholds(), Utc::now());
        assert!(matches!(decision, RoutingDecision::Unsorted { .. }));
    }

    #[test]
    fn placement_invariant_holds_for_every_reference() {
        let matches = vec![
            fmatch("A", 0.90, &[("c1", 0.90)]),
            fmatch("B", 0.85, &[("c2", 0.85)]),
            fmatch("C", 0.60, &[("c3", 0.60)]), // clears cross_link_min but not folder_placement
        ];
        let t = thresholds();
        let decision = decide(&matches, &t, Utc::now());
        match decision {
            RoutingDecision::Route { placement, .. } => {
                assert!(!placement.references.contains(&placement.primary));
                for reference in &placement.references {
                    let score = placement.confidences[reference];
                    assert!(score >= t.folder_placement);
                    assert!(placement.confidences[&placement.primary] - score <= t.cross_link_delta);
                }
                assert!(!placement.references.contains(&"C".to_string()));
            }
            other => panic!("expected Route, got {other:?}"),
        }
    }

    #[test]
    fn placements_capped_at_five_total() {
        let matches: Vec<FolderMatch> = (0..10).map(|i| fmatch(&format!("f{i}"), 0.90 - i as f64 * 0.001, &[("c", 0.9)])).collect();
        let decision = decide(&matches, &thresholds(), Utc::now());
        match decision {
            RoutingDecision::Route { placement, .. } => {
                assert!(placement.references.len() + 1 <= MAX_PLACEMENTS);
            }
            other => panic!("expected Route, got {other:?}"),
        }
    }

    #[test]
    fn determinism_same_input_same_output() {
        let matches = vec![fmatch("ml-folder", 0.874, &[("c1", 0.85), ("c2", 0.83)])];
        let t = thresholds();
        let now = Utc::now();
        let a = decide(&matches, &t, now);
        let b = decide(&matches, &t, now);
        assert_eq!(a, b);
    }
}
