/// Errors raised by the numeric kernels in this crate.
///
/// Both variants are programming errors from the caller's perspective —
/// `EmptyInput` means a caller forgot to check for an empty member set,
/// `DimensionMismatch` means two vectors that were supposed to live in
/// the same embedding space do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum VectorMathError {
    #[error("cannot compute a centroid of zero vectors")]
    EmptyInput,

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}
