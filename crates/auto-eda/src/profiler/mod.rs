//! Data profiling module.
//!
//! Every function here is a pure function of a [`Table`]. Nothing is cached;
//! a render pass simply profiles again. Zero-row, zero-column and all-missing
//! tables are valid input and produce undefined statistics rather than errors.

mod statistics;

use crate::error::Result;
use crate::types::{
    ColumnKind, ColumnProfile, ColumnType, DescribeRow, MissingEntry, MissingReport, Table,
};
use crate::utils::{column_kind, dtype_tag};
use polars::prelude::*;
use tracing::debug;

pub(crate) use statistics::calculate_mean;
use statistics::{describe_categorical, describe_numeric};

/// Data profiler for shape, types, missing values and descriptive statistics.
pub struct DataProfiler;

impl DataProfiler {
    /// Row and column count.
    pub fn shape(table: &Table) -> (usize, usize) {
        (table.height(), table.width())
    }

    /// Type tag of every column, in table order.
    pub fn dtypes(table: &Table) -> Vec<ColumnType> {
        table
            .df()
            .get_columns()
            .iter()
            .map(|col| ColumnType {
                name: col.name().to_string(),
                dtype: dtype_tag(col.dtype()),
                kind: column_kind(col.dtype()),
            })
            .collect()
    }

    /// Missing values per column.
    ///
    /// Only columns with at least one missing value are listed, by descending
    /// count. Equal counts keep table order.
    pub fn missing_report(table: &Table) -> MissingReport {
        let mut entries: Vec<MissingEntry> = table
            .df()
            .get_columns()
            .iter()
            .filter(|col| col.null_count() > 0)
            .map(|col| MissingEntry {
                column: col.name().to_string(),
                count: col.null_count(),
            })
            .collect();

        if entries.is_empty() {
            return MissingReport::Empty;
        }

        entries.sort_by(|a, b| b.count.cmp(&a.count));
        MissingReport::Columns(entries)
    }

    /// Descriptive statistics for all columns, one row per column.
    pub fn describe(table: &Table) -> Result<Vec<DescribeRow>> {
        table
            .df()
            .get_columns()
            .iter()
            .map(|col| Self::describe_column(col.as_materialized_series()))
            .collect()
    }

    /// Full per-column profile: type tag, missing count and statistics.
    pub fn profile_columns(table: &Table) -> Result<Vec<ColumnProfile>> {
        let profiles = table
            .df()
            .get_columns()
            .iter()
            .map(|col| {
                let series = col.as_materialized_series();
                Ok(ColumnProfile {
                    name: series.name().to_string(),
                    dtype: dtype_tag(series.dtype()),
                    kind: column_kind(series.dtype()),
                    missing_count: series.null_count(),
                    stats: Self::describe_column(series)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Profiled {} columns of table v{}",
            profiles.len(),
            table.version()
        );
        Ok(profiles)
    }

    fn describe_column(series: &Series) -> Result<DescribeRow> {
        let row = match column_kind(series.dtype()) {
            ColumnKind::Numeric => describe_numeric(series)?,
            ColumnKind::Categorical => describe_categorical(series)?,
        };
        Ok(row)
    }
}
