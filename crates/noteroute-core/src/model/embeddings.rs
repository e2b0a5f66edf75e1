use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Two-vector embedding model: a shorter title vector for dedup and a
/// longer context vector for routing. Both carry the same `dimensions`
/// as the vector index they will be searched against.
///
/// Per the design notes, the source system also had a single-vector
/// shape in some legacy paths. This type exposes the two-vector model
/// only; callers producing a single vector populate both fields with it
/// at the boundary — see [`VectorEmbeddings::from_single_vector`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VectorEmbeddings {
    pub title_vector: Vec<f32>,
    pub context_vector: Vec<f32>,
    pub content_hash: String,
    pub model: String,
    pub dimensions: usize,
    pub cached: bool,
    pub embedded_at: DateTime<Utc>,
}

impl VectorEmbeddings {
    /// Build an embeddings record for a legacy single-vector provider by
    /// populating both the title and context vector with the same
    /// embedding.
    pub fn from_single_vector(
        vector: Vec<f32>,
        content_hash: String,
        model: String,
        cached: bool,
        embedded_at: DateTime<Utc>,
    ) -> Self {
        let dimensions = vector.len();
        Self {
            title_vector: vector.clone(),
            context_vector: vector,
            content_hash,
            model,
            dimensions,
            cached,
            embedded_at,
        }
    }

    /// True if both vectors have the declared dimensionality.
    pub fn has_consistent_dimensions(&self) -> bool {
        self.title_vector.len() == self.dimensions && self.context_vector.len() == self.dimensions
    }
}
