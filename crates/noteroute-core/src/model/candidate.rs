use serde::{Deserialize, Serialize};

/// Where a candidate came from — batch id, position, and originating
/// window/topic, carried through for provenance and explanation text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CandidateSource {
    /// Identifier of the batch this candidate was produced in.
    pub batch_id: String,
    /// Capture window label (e.g. a session or lecture id).
    pub window: String,
    /// Topic hint supplied by the caller, if any.
    pub topic: Option<String>,
    /// Unix timestamp (seconds) the candidate was captured.
    pub timestamp: i64,
}

/// Immutable input to the pipeline: a raw, un-distilled free-text note.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConceptCandidate {
    /// Opaque caller-assigned identifier.
    pub id: String,
    /// Raw text exactly as captured.
    pub raw_text: String,
    /// Provenance.
    pub source: CandidateSource,
    /// Position of this candidate within its batch.
    pub index: usize,
}

impl ConceptCandidate {
    pub fn new(id: impl Into<String>, raw_text: impl Into<String>, source: CandidateSource, index: usize) -> Self {
        Self {
            id: id.into(),
            raw_text: raw_text.into(),
            source,
            index,
        }
    }

    /// Canonicalised text used as the input to distillation.
    ///
    /// Collapses internal whitespace runs and trims the ends; this is
    /// the text whose SHA-256 becomes the distillation/embedding cache
    /// key, so normalization must be stable across repeated calls with
    /// equivalent raw text.
    pub fn normalize(&self) -> String {
        self.raw_text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> CandidateSource {
        CandidateSource {
            batch_id: "b1".into(),
            window: "w1".into(),
            topic: None,
            timestamp: 0,
        }
    }

    #[test]
    fn normalize_collapses_whitespace() {
        let c = ConceptCandidate::new("c1", "  hello   world  \n", source(), 0);
        assert_eq!(c.normalize(), "hello world");
    }

    #[test]
    fn normalize_is_stable() {
        let c = ConceptCandidate::new("c1", "a b c", source(), 0);
        assert_eq!(c.normalize(), c.normalize());
    }
}
