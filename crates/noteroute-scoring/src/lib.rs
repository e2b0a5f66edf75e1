//! # noteroute-scoring
//!
//! The routing decision core: folder scoring (C2), the duplicate
//! short-circuit (C3), folder matching (C4), and the pure decision state
//! machine (C5). Everything here is either a pure function or a single
//! read-only capability call — side effects (index upserts, centroid
//! updates) are the caller's responsibility, requested only after a
//! decision is made (§5 idempotence).

pub mod decision_maker;
pub mod duplicate_detector;
pub mod folder_matcher;
pub mod folder_scorer;

pub use decision_maker::decide;
pub use duplicate_detector::{detect as detect_duplicate, DuplicateHit};
pub use folder_matcher::match_folders;
