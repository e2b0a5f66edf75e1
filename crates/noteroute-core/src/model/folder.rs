use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::UNSORTED_FOLDER_ID;

/// Opaque folder identifier. The reserved value `"unsorted"` names the
/// catch-all folder; see [`FolderId::unsorted`].
pub type FolderId = String;

/// Normalise a possibly-absent folder id the way the index ingress does:
/// a missing or empty folder id collapses to `"unsorted"`. This resolves
/// the open question in the design notes about the two different ways
/// "no folder" was filtered upstream.
pub fn normalize_folder_id(folder_id: Option<&str>) -> FolderId {
    match folder_id {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => UNSORTED_FOLDER_ID.to_string(),
    }
}

/// A committed placement of a concept into one or more folders.
///
/// Invariants: `primary` is a key of `confidences`; every entry of
/// `references` is a key of `confidences`; `primary` is never present in
/// `references`; every confidence lies in `[0, 1]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FolderPlacement {
    pub primary: FolderId,
    pub references: Vec<FolderId>,
    pub confidences: HashMap<FolderId, f64>,
}

/// A placement that violated one of its invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementInvariantError {
    #[error("primary folder {0:?} has no recorded confidence")]
    PrimaryMissingConfidence(FolderId),
    #[error("reference folder {0:?} has no recorded confidence")]
    ReferenceMissingConfidence(FolderId),
    #[error("primary folder {0:?} also appears as a reference")]
    PrimaryIsReference(FolderId),
    #[error("confidence {1} for folder {0:?} is outside [0, 1]")]
    ConfidenceOutOfRange(FolderId, f64),
}

impl FolderPlacement {
    /// Construct a placement, validating every invariant from the spec.
    pub fn new(
        primary: FolderId,
        references: Vec<FolderId>,
        confidences: HashMap<FolderId, f64>,
    ) -> Result<Self, PlacementInvariantError> {
        for (folder, conf) in &confidences {
            if !(0.0..=1.0).contains(conf) {
                return Err(PlacementInvariantError::ConfidenceOutOfRange(folder.clone(), *conf));
            }
        }
        if !confidences.contains_key(&primary) {
            return Err(PlacementInvariantError::PrimaryMissingConfidence(primary));
        }
        if references.contains(&primary) {
            return Err(PlacementInvariantError::PrimaryIsReference(primary));
        }
        for reference in &references {
            if !confidences.contains_key(reference) {
                return Err(PlacementInvariantError::ReferenceMissingConfidence(reference.clone()));
            }
        }
        Ok(Self {
            primary,
            references,
            confidences,
        })
    }
}

/// A transient, scored candidate folder produced by `FolderMatcher`
/// before the decision machine picks a winner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FolderMatch {
    pub folder_id: FolderId,
    /// In `[0, 1 + max_count_bonus]` — see `FolderScorer`.
    pub score: f64,
    pub concept_count: usize,
    /// `(concept_id, similarity)` pairs backing this match, sorted by
    /// similarity descending.
    pub similar_concepts: Vec<(String, f64)>,
}

/// Cohesion / separation / stability / overall quality of a folder's
/// centroid, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FolderQuality {
    pub cohesion: f64,
    pub separation: f64,
    pub stability: f64,
    pub overall: f64,
}

impl FolderQuality {
    pub const UNKNOWN: FolderQuality = FolderQuality {
        cohesion: 0.0,
        separation: 0.0,
        stability: 0.0,
        overall: 0.0,
    };

    /// Combine components per the spec weighting:
    /// `overall = 0.5*cohesion + 0.3*separation + 0.2*stability`.
    pub fn combine(cohesion: f64, separation: f64, stability: f64) -> Self {
        Self {
            cohesion,
            separation,
            stability,
            overall: 0.5 * cohesion + 0.3 * separation + 0.2 * stability,
        }
    }
}

/// Per-folder vector representation maintained by the `CentroidManager`.
///
/// Invariant: `centroid.len()` equals the index dimensionality, and every
/// exemplar has the same length.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FolderCentroid {
    pub folder_id: FolderId,
    pub centroid: Vec<f32>,
    pub exemplars: Vec<Vec<f32>>,
    pub member_count: usize,
    pub last_updated: DateTime<Utc>,
    pub quality: FolderQuality,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_missing_becomes_unsorted() {
        assert_eq!(normalize_folder_id(None), "unsorted");
        assert_eq!(normalize_folder_id(Some("")), "unsorted");
    }

    #[test]
    fn normalize_present_passes_through() {
        assert_eq!(normalize_folder_id(Some("ml-folder")), "ml-folder");
    }

    #[test]
    fn placement_rejects_primary_as_reference() {
        let mut conf = HashMap::new();
        conf.insert("a".to_string(), 0.9);
        let err = FolderPlacement::new("a".to_string(), vec!["a".to_string()], conf).unwrap_err();
        assert!(matches!(err, PlacementInvariantError::PrimaryIsReference(_)));
    }

    #[test]
    fn placement_rejects_missing_confidence() {
        let conf = HashMap::new();
        let err = FolderPlacement::new("a".to_string(), vec![], conf).unwrap_err();
        assert!(matches!(err, PlacementInvariantError::PrimaryMissingConfidence(_)));
    }

    #[test]
    fn placement_rejects_out_of_range_confidence() {
        let mut conf = HashMap::new();
        conf.insert("a".to_string(), 1.5);
        let err = FolderPlacement::new("a".to_string(), vec![], conf).unwrap_err();
        assert!(matches!(err, PlacementInvariantError::ConfidenceOutOfRange(_, _)));
    }

    #[test]
    fn placement_accepts_valid_structure() {
        let mut conf = HashMap::new();
        conf.insert("a".to_string(), 0.9);
        conf.insert("b".to_string(), 0.75);
        let placement = FolderPlacement::new("a".to_string(), vec!["b".to_string()], conf).unwrap();
        assert_eq!(placement.primary, "a");
        assert_eq!(placement.references, vec!["b".to_string()]);
    }
}
