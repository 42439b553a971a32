//! Deterministic row sampling for the pairwise plot.

use polars::prelude::*;
use rand::prelude::*;

/// Row indices used by the pairwise plot.
///
/// Tables at or below `cap` rows are used whole. Larger tables yield exactly
/// `cap` distinct indices chosen by an RNG seeded with `seed`, returned in
/// ascending order. The same `(height, cap, seed)` always gives the same rows.
pub(crate) fn sample_row_indices(height: usize, cap: usize, seed: u64) -> Vec<usize> {
    if height <= cap {
        return (0..height).collect();
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let indices: Vec<usize> = (0..height).collect();
    let mut sampled: Vec<usize> = indices.choose_multiple(&mut rng, cap).copied().collect();
    sampled.sort_unstable();
    sampled
}

/// Keep only the given rows of `df`, in table order.
pub(crate) fn take_rows(df: &DataFrame, indices: &[usize]) -> PolarsResult<DataFrame> {
    if indices.len() == df.height() {
        return Ok(df.clone());
    }

    let mut mask = vec![false; df.height()];
    for &idx in indices {
        mask[idx] = true;
    }
    df.filter(&BooleanChunked::new("sample".into(), &mask))
}
