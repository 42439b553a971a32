//! Pearson correlation matrix for the heatmap.

use anofox_statistics::correlation::pearson;

/// Fewer complete pairs than this leave a coefficient undefined.
const MIN_COMPLETE_PAIRS: usize = 3;

/// Pairwise Pearson correlation of the given columns.
///
/// Each pair uses only the rows where both values are present. A coefficient
/// is `None` when fewer than three such rows exist or either side is constant.
pub(crate) fn correlation_matrix(columns: &[Vec<Option<f64>>]) -> Vec<Vec<Option<f64>>> {
    let size = columns.len();
    let mut matrix = vec![vec![None; size]; size];

    for i in 0..size {
        for j in i..size {
            let (x, y) = complete_pairs(&columns[i], &columns[j]);
            let r = if i == j {
                self_correlation(&x)
            } else {
                pearson_estimate(&x, &y)
            };
            matrix[i][j] = r;
            matrix[j][i] = r;
        }
    }

    matrix
}

fn complete_pairs(a: &[Option<f64>], b: &[Option<f64>]) -> (Vec<f64>, Vec<f64>) {
    a.iter()
        .zip(b.iter())
        .filter_map(|pair| match pair {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((*x, *y)),
            _ => None,
        })
        .unzip()
}

fn pearson_estimate(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() < MIN_COMPLETE_PAIRS || is_constant(x) || is_constant(y) {
        return None;
    }

    match pearson(x, y, None) {
        // rounding can push |r| a hair past 1
        Ok(result) if result.estimate.is_finite() => Some(result.estimate.clamp(-1.0, 1.0)),
        _ => None,
    }
}

/// The diagonal is 1 wherever the column's own coefficient is defined.
fn self_correlation(values: &[f64]) -> Option<f64> {
    (values.len() >= MIN_COMPLETE_PAIRS && !is_constant(values)).then_some(1.0)
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}
