//! Pure numeric kernels over fixed-length float vectors (§4.1 / C1).
//!
//! Every function here is total for equal-length inputs. A dimension
//! mismatch between vectors that are supposed to live in the same space is
//! a programming error, not a recoverable condition — it surfaces as
//! [`VectorMathError::DimensionMismatch`] rather than a silent default.

mod errors;

pub use errors::VectorMathError;

/// Cosine similarity between two equal-length vectors.
///
/// Returns `0.0` if either vector has zero magnitude. Does not clamp the
/// result to `[-1, 1]`; floating-point error can push a genuinely
/// collinear pair a hair outside that range, and callers that need the
/// clamp (explanation text, duplicate thresholds) apply it themselves.
///
/// # Errors
/// Returns [`VectorMathError::DimensionMismatch`] if `a.len() != b.len()`.
pub fn cosine(a: &[f32], b: &[f32]) -> Result<f64, VectorMathError> {
    if a.len() != b.len() {
        return Err(VectorMathError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b.iter()) {
        let x = *x as f64;
        let y = *y as f64;
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        return Ok(0.0);
    }
    Ok(dot / denom)
}

/// Arithmetic mean of a set of equal-length vectors, per dimension.
///
/// # Errors
/// Returns [`VectorMathError::EmptyInput`] if `vs` is empty, or
/// [`VectorMathError::DimensionMismatch`] if the vectors don't all share
/// the first vector's length.
pub fn centroid(vs: &[Vec<f32>]) -> Result<Vec<f32>, VectorMathError> {
    let dims = vs.first().ok_or(VectorMathError::EmptyInput)?.len();
    let mut sum = vec![0.0f64; dims];
    for v in vs {
        if v.len() != dims {
            return Err(VectorMathError::DimensionMismatch {
                expected: dims,
                actual: v.len(),
            });
        }
        for (s, x) in sum.iter_mut().zip(v.iter()) {
            *s += *x as f64;
        }
    }
    let n = vs.len() as f64;
    Ok(sum.into_iter().map(|s| (s / n) as f32).collect())
}

/// Mean cosine similarity of each member to the set's centroid — a proxy
/// for how tightly a folder's members cluster together.
///
/// Returns `1.0` when `vs.len() < 2` (a singleton, or empty set, is
/// trivially coherent).
///
/// # Errors
/// Returns [`VectorMathError::DimensionMismatch`] on unequal-length
/// members.
pub fn coherence(vs: &[Vec<f32>]) -> Result<f64, VectorMathError> {
    if vs.len() < 2 {
        return Ok(1.0);
    }
    let c = centroid(vs)?;
    let mut total = 0.0;
    for v in vs {
        total += cosine(v, &c)?;
    }
    Ok(total / vs.len() as f64)
}

/// Arithmetic mean of a list of similarities, or `0.0` if empty.
pub fn average_similarity(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Maximum of a list of similarities, or `0.0` if empty.
pub fn max_similarity(xs: &[f64]) -> f64 {
    xs.iter().cloned().fold(0.0, f64::max)
}

/// L2-normalize a vector in place. No-op on a zero vector.
pub fn normalize_in_place(v: &mut [f32]) {
    let norm: f64 = v.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt();
    if norm == 0.0 {
        return;
    }
    for x in v.iter_mut() {
        *x = ((*x as f64) / norm) as f32;
    }
}
