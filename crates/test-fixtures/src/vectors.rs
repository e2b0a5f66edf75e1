//! Deterministic vector-generation helpers. A full RNG crate would be
//! overkill for fixture data that only needs to be reproducible and
//! spread out, not cryptographically random — a splitmix64-style
//! generator keyed by an explicit seed gets there in a few lines.

fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// A deterministic, L2-normalized vector of `dims` dimensions derived
/// from `seed`. Same `(seed, dims)` always yields the same vector.
pub fn seeded_unit_vector(seed: u64, dims: usize) -> Vec<f32> {
    let mut state = seed;
    let mut v: Vec<f32> = (0..dims)
        .map(|_| {
            let bits = splitmix64(&mut state);
            (bits as f64 / u64::MAX as f64) * 2.0 - 1.0
        })
        .map(|x| x as f32)
        .collect();
    noteroute_vectormath::normalize_in_place(&mut v);
    v
}

/// A vector near `base`, perturbed by `noise` (roughly: cosine
/// similarity decreases as `noise` grows), for building fixtures that
/// need a cluster of related-but-not-identical vectors.
pub fn perturbed_vector(base: &[f32], noise: f32, seed: u64) -> Vec<f32> {
    let jitter = seeded_unit_vector(seed, base.len());
    let mut v: Vec<f32> = base.iter().zip(jitter.iter()).map(|(b, j)| b + j * noise).collect();
    noteroute_vectormath::normalize_in_place(&mut v);
    v
}
