use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::cluster::FolderSuggestion;
use super::folder::{FolderId, FolderPlacement};

/// The transition-table rule that produced a decision — recorded so the
/// explanation is deterministic and reviewable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PrimarySignal {
    NoMatches,
    BelowNewTopic,
    AboveDuplicateThreshold,
    AboveHighConfidence,
    AboveLowConfidence,
    /// Falls in `[new_topic, low_confidence)`: past the new-topic floor
    /// but not confident enough even for manual review (§4.5 row 5, the
    /// transition table's fall-through case).
    BelowLowConfidence,
}

/// One similar concept surfaced in an explanation, most-similar first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimilarConcept {
    pub concept_id: String,
    pub similarity: f64,
}

/// One ordered factor behind a decision (e.g. "score 0.87 crossed
/// high_confidence 0.82").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionFactor {
    pub description: String,
}

/// A summary of the top folder matches considered, for explanation only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FolderMatchSummary {
    pub folder_id: FolderId,
    pub score: f64,
}

/// Deterministic, human-readable record of why a decision was reached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionExplanation {
    pub primary_signal: PrimarySignal,
    /// Up to 5 strongest similar concepts, most-similar first.
    pub similar_concepts: Vec<SimilarConcept>,
    /// Ordered list of the factors that drove the decision.
    pub factors: Vec<DecisionFactor>,
    /// Up to 3 strongest folder matches considered.
    pub top_folder_matches: Vec<FolderMatchSummary>,
    pub summary: String,
}

/// The outcome of routing one concept candidate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum RoutingDecision {
    /// Routed to `primary`, with zero or more cross-linked/alternative
    /// placements.
    Route {
        placement: FolderPlacement,
        confidence: f64,
        explanation: DecisionExplanation,
        timestamp: DateTime<Utc>,
    },
    /// A near-identical concept already exists; nothing new was created.
    Duplicate {
        duplicate_id: String,
        confidence: f64,
        explanation: DecisionExplanation,
        timestamp: DateTime<Utc>,
    },
    /// No folder was confident enough; left in the catch-all.
    Unsorted {
        confidence: f64,
        explanation: DecisionExplanation,
        timestamp: DateTime<Utc>,
    },
    /// Ambiguous — a human should confirm the placement.
    Review {
        confidence: f64,
        explanation: DecisionExplanation,
        timestamp: DateTime<Utc>,
    },
    /// An expansion opportunity: enough "unsorted" neighbours were found
    /// to justify proposing a brand-new folder.
    CreateFolder {
        suggestion: FolderSuggestion,
        confidence: f64,
        explanation: DecisionExplanation,
        timestamp: DateTime<Utc>,
    },
}

impl RoutingDecision {
    pub fn confidence(&self) -> f64 {
        match self {
            RoutingDecision::Route { confidence, .. }
            | RoutingDecision::Duplicate { confidence, .. }
            | RoutingDecision::Unsorted { confidence, .. }
            | RoutingDecision::Review { confidence, .. }
            | RoutingDecision::CreateFolder { confidence, .. } => *confidence,
        }
    }

    pub fn explanation(&self) -> &DecisionExplanation {
        match self {
            RoutingDecision::Route { explanation, .. }
            | RoutingDecision::Duplicate { explanation, .. }
            | RoutingDecision::Unsorted { explanation, .. }
            | RoutingDecision::Review { explanation, .. }
            | RoutingDecision::CreateFolder { explanation, .. } => explanation,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            RoutingDecision::Route { timestamp, .. }
            | RoutingDecision::Duplicate { timestamp, .. }
            | RoutingDecision::Unsorted { timestamp, .. }
            | RoutingDecision::Review { timestamp, .. }
            | RoutingDecision::CreateFolder { timestamp, .. } => *timestamp,
        }
    }

    /// Name of the variant, for logging/metrics labels.
    pub fn kind(&self) -> &'static str {
        match self {
            RoutingDecision::Route { .. } => "route",
            RoutingDecision::Duplicate { .. } => "duplicate",
            RoutingDecision::Unsorted { .. } => "unsorted",
            RoutingDecision::Review { .. } => "review",
            RoutingDecision::CreateFolder { .. } => "create_folder",
        }
    }
}
