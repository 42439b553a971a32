//! Shared helpers for dtype classification and value extraction.
//!
//! Everything that turns a polars `Series` into plain Rust values lives here
//! so the profiler, cleaner and chart selector agree on the same rules.

use crate::types::ColumnKind;
use polars::prelude::*;
use std::collections::HashMap;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
///
/// Booleans are not numeric here; they are charted as categories.
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Classify a DataType for chart eligibility.
pub fn column_kind(dtype: &DataType) -> ColumnKind {
    if is_numeric_dtype(dtype) {
        ColumnKind::Numeric
    } else {
        ColumnKind::Categorical
    }
}

/// Type tag shown to the user, e.g. "Int64" or "String".
pub fn dtype_tag(dtype: &DataType) -> String {
    format!("{:?}", dtype)
}

// =============================================================================
// Value Extraction
// =============================================================================

/// All values of a Series as `f64`, keeping nulls in place.
pub fn f64_values(series: &Series) -> PolarsResult<Vec<Option<f64>>> {
    let casted = series.cast(&DataType::Float64)?;
    Ok(casted.f64()?.into_iter().collect())
}

/// Non-null values of a Series as `f64`, in table order.
///
/// NaN is treated as missing.
pub fn non_null_f64_values(series: &Series) -> PolarsResult<Vec<f64>> {
    Ok(f64_values(series)?
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .collect())
}

/// All values of a Series rendered as strings, keeping nulls in place.
pub fn string_values(series: &Series) -> PolarsResult<Vec<Option<String>>> {
    let casted = series.cast(&DataType::String)?;
    Ok(casted
        .str()?
        .into_iter()
        .map(|value| value.map(|s| s.to_string()))
        .collect())
}

/// Count occurrences of each value.
///
/// Sorted by descending count; ties keep the order of first occurrence.
pub fn value_counts_ordered<I>(values: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = String>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for value in values {
        match index.get(&value) {
            Some(&pos) => counts[pos].1 += 1,
            None => {
                index.insert(value.clone(), counts.len());
                counts.push((value, 1));
            }
        }
    }

    // sort_by is stable, so first-seen order survives among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

// =============================================================================
// Series Statistics Utilities
// =============================================================================

/// Quantile of already sorted values, interpolating linearly between ranks.
///
/// Returns `None` for an empty slice.
pub fn quantile_sorted(sorted: &[f64], quantile: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = quantile.clamp(0.0, 1.0) * (sorted.len() as f64 - 1.0);
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        return Some(sorted[lower]);
    }
    let weight = pos - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

/// Fill null values in a numeric Series with a specific value.
///
/// The result is always `Float64` and keeps the Series name.
pub fn fill_numeric_nulls(series: &Series, fill_value: f64) -> PolarsResult<Series> {
    let casted = series.cast(&DataType::Float64)?;
    let filled = casted.f64()?.apply(|v| Some(v.unwrap_or(fill_value)));
    Ok(filled.into_series().with_name(series.name().clone()))
}

// =============================================================================
// Tests
// =============================================================================
