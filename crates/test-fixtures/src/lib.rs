//! Shared test doubles for the five capability traits (§6), re-scoped
//! from the teacher's fixture crate: an in-memory `VectorIndex` mock and
//! deterministic vector-generation helpers, so every crate's test module
//! builds fixtures the same way instead of re-deriving them per-crate.

pub mod index;
pub mod vectors;

pub use index::InMemoryVectorIndex;
pub use vectors::{perturbed_vector, seeded_unit_vector};
