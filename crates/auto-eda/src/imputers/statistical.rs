//! Statistical imputation methods.

use crate::error::Result;
use crate::profiler::calculate_mean;
use crate::utils::{fill_numeric_nulls, is_numeric_dtype, non_null_f64_values};
use polars::prelude::*;
use tracing::debug;

/// Statistical imputation methods for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Apply mean imputation to one numeric column.
    ///
    /// The mean is taken over the column's non-missing values before any
    /// replacement. Returns whether the column was changed: columns without
    /// missing values, non-numeric columns and all-missing columns (mean
    /// undefined) are left as they are.
    pub fn apply_numeric_mean(
        df: &mut DataFrame,
        col_name: &str,
        processing_steps: &mut Vec<String>,
    ) -> Result<bool> {
        let (mean_val, series) = match df.column(col_name) {
            Ok(col) => {
                let series = col.as_materialized_series();
                if !is_numeric_dtype(series.dtype()) || series.null_count() == 0 {
                    return Ok(false);
                }
                let values = non_null_f64_values(series)?;
                (calculate_mean(&values), series.clone())
            }
            Err(_) => return Ok(false),
        };

        let Some(mean_val) = mean_val else {
            debug!("Mean of '{}' is undefined, leaving it missing", col_name);
            return Ok(false);
        };

        Self::fill_with_value(df, col_name, mean_val, &series, processing_steps, "mean")?;
        Ok(true)
    }

    /// Fill numeric column with a specific value.
    fn fill_with_value(
        df: &mut DataFrame,
        col_name: &str,
        fill_value: f64,
        series: &Series,
        processing_steps: &mut Vec<String>,
        method: &str,
    ) -> Result<()> {
        let missing = series.null_count();
        let filled = fill_numeric_nulls(series, fill_value)?;
        df.replace(col_name, filled)?;

        processing_steps.push(format!(
            "Filled {} missing values in '{}' with {}: {:.2}",
            missing, col_name, method, fill_value
        ));

        Ok(())
    }
}
