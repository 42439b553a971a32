//! Descriptive statistics for a single column.

use crate::types::DescribeRow;
use crate::utils::{non_null_f64_values, quantile_sorted, string_values, value_counts_ordered};
use polars::prelude::*;

/// Describe a numeric column: count, mean, std, min, quartiles, max.
pub(crate) fn describe_numeric(series: &Series) -> PolarsResult<DescribeRow> {
    let values = non_null_f64_values(series)?;
    let mut sorted = values.clone();
    sorted.sort_by(|a, b| a.total_cmp(b));

    Ok(DescribeRow {
        column: series.name().to_string(),
        count: values.len(),
        mean: calculate_mean(&values),
        std: calculate_std(&values),
        min: sorted.first().copied(),
        q25: quantile_sorted(&sorted, 0.25),
        median: quantile_sorted(&sorted, 0.5),
        q75: quantile_sorted(&sorted, 0.75),
        max: sorted.last().copied(),
        ..DescribeRow::default()
    })
}

/// Describe a categorical column: count, unique, top, freq.
pub(crate) fn describe_categorical(series: &Series) -> PolarsResult<DescribeRow> {
    let values: Vec<String> = string_values(series)?.into_iter().flatten().collect();
    let count = values.len();
    let counts = value_counts_ordered(values);
    let top = counts.first().cloned();

    Ok(DescribeRow {
        column: series.name().to_string(),
        count,
        unique: (count > 0).then_some(counts.len()),
        top: top.as_ref().map(|(value, _)| value.clone()),
        freq: top.map(|(_, freq)| freq),
        ..DescribeRow::default()
    })
}

/// Arithmetic mean, undefined for no values.
pub(crate) fn calculate_mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator), undefined below two values.
pub(crate) fn calculate_std(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let mean = calculate_mean(values)?;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n as f64 - 1.0);
    Some(variance.sqrt())
}
