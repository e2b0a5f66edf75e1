/// noteroute version (from the crate's own Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reserved folder id for concepts with no confident placement.
pub const UNSORTED_FOLDER_ID: &str = "unsorted";

/// Hard cap on the number of folder placements (primary + references +
/// alternatives) a single `Route` decision may carry.
pub const MAX_PLACEMENTS: usize = 5;

/// Maximum number of similar concepts recorded in a decision explanation.
pub const MAX_EXPLANATION_CONCEPTS: usize = 5;

/// Maximum number of folder matches recorded in a decision explanation.
pub const MAX_EXPLANATION_FOLDER_MATCHES: usize = 3;
