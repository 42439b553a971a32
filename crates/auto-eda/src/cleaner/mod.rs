//! User-triggered cleaning operations.
//!
//! - Dropping rows that contain any missing value
//! - Filling missing numeric values with the column mean
//!
//! Both operations derive a new [`Table`] version and are idempotent. They
//! are applied in the order the user enabled them; dropping first shrinks
//! the rows the mean is computed over, so the two orders can disagree.

use crate::error::{Result, ResultExt};
use crate::imputers::StatisticalImputer;
use crate::types::{CleaningOp, Table, ToggleState};
use crate::utils::is_numeric_dtype;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Result of applying the enabled cleaning operations.
#[derive(Debug, Clone)]
pub struct CleaningOutcome {
    /// The cleaned table, or the input table when nothing was enabled.
    pub table: Table,
    /// One entry per applied operation, in application order.
    pub applied: Vec<AppliedCleaning>,
}

/// Record of one applied cleaning operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedCleaning {
    pub op: CleaningOp,
    /// User-facing success message.
    pub message: String,
    /// Detailed steps (rows removed, fill values).
    pub steps: Vec<String>,
}

/// Data cleaner for the dashboard's cleaning toggles.
pub struct DataCleaner;

impl DataCleaner {
    /// Apply every enabled operation in toggle order.
    pub fn apply(table: &Table, toggles: &ToggleState) -> Result<CleaningOutcome> {
        let mut current = table.clone();
        let mut applied = Vec::with_capacity(toggles.ops().len());

        for &op in toggles.ops() {
            let mut steps = Vec::new();
            current = match op {
                CleaningOp::DropMissing => Self::drop_missing_with_steps(&current, &mut steps)
                    .context("Dropping rows with missing values")?,
                CleaningOp::ImputeMean => Self::impute_mean_with_steps(&current, &mut steps)
                    .context("Filling missing values with column mean")?,
            };
            applied.push(AppliedCleaning {
                op,
                message: success_message(op).to_string(),
                steps,
            });
        }

        if !applied.is_empty() {
            info!(
                "Applied {} cleaning operation(s): table v{} -> v{}",
                applied.len(),
                table.version(),
                current.version()
            );
        }

        Ok(CleaningOutcome {
            table: current,
            applied,
        })
    }

    /// Remove every row that has a missing value in any column.
    pub fn drop_missing(table: &Table) -> Result<Table> {
        Self::drop_missing_with_steps(table, &mut Vec::new())
    }

    /// Replace missing numeric values with the mean of their column.
    ///
    /// Categorical columns keep their missing values.
    pub fn impute_mean(table: &Table) -> Result<Table> {
        Self::impute_mean_with_steps(table, &mut Vec::new())
    }

    fn drop_missing_with_steps(table: &Table, steps: &mut Vec<String>) -> Result<Table> {
        let df = table.df();
        let before_rows = df.height();

        let mut keep = BooleanChunked::full("keep".into(), true, before_rows);
        for col in df.get_columns() {
            if col.null_count() > 0 {
                keep = &keep & &col.as_materialized_series().is_not_null();
            }
        }
        let cleaned = df.filter(&keep)?;

        let rows_removed = before_rows - cleaned.height();
        if rows_removed > 0 {
            let pct = (rows_removed as f64 / before_rows as f64) * 100.0;
            steps.push(format!(
                "Removed {} rows with missing values ({:.1}%)",
                rows_removed, pct
            ));
            debug!("Removed {} rows with missing values", rows_removed);
        } else {
            steps.push("No rows with missing values found".to_string());
        }

        Ok(table.derive(cleaned))
    }

    fn impute_mean_with_steps(table: &Table, steps: &mut Vec<String>) -> Result<Table> {
        let mut df = table.df().clone();
        let numeric_columns: Vec<String> = df
            .get_columns()
            .iter()
            .filter(|col| is_numeric_dtype(col.dtype()))
            .map(|col| col.name().to_string())
            .collect();

        let mut filled = 0;
        for name in &numeric_columns {
            if StatisticalImputer::apply_numeric_mean(&mut df, name, steps)? {
                filled += 1;
            }
        }

        if filled == 0 {
            steps.push("No missing numeric values to fill".to_string());
        }
        debug!("Mean-imputed {} numeric columns", filled);

        Ok(table.derive(df))
    }
}

fn success_message(op: CleaningOp) -> &'static str {
    match op {
        CleaningOp::DropMissing => "Dropped rows with missing values",
        CleaningOp::ImputeMean => "Filled missing numeric values with column mean",
    }
}
