//! Chart selection.
//!
//! Decides, for each dashboard chart, whether the table has eligible columns
//! and which column drives it, then packages the data the plotting layer
//! needs. Histogram binning and box quartiles are left to the plotting
//! layer; only the correlation matrix, category counts and the pairwise
//! sample are prepared here.
//!
//! A chart without eligible columns is [`ChartOutcome::Empty`], an
//! informational state rather than an error.

mod correlation;
mod sampling;

use crate::classifier::ColumnPartition;
use crate::config::EdaConfig;
use crate::error::{EdaError, Result, ResultExt};
use crate::types::Table;
use crate::utils::{f64_values, non_null_f64_values, string_values, value_counts_ordered};
use serde::{Deserialize, Serialize};
use tracing::debug;

use correlation::correlation_matrix;
use sampling::{sample_row_indices, take_rows};

pub const NOT_ENOUGH_FOR_HEATMAP: &str = "Not enough numerical columns for correlation heatmap.";
pub const NO_NUMERIC_FOR_DISTRIBUTION: &str =
    "No numerical columns available for distribution analysis.";
pub const NO_CATEGORICAL_COLUMNS: &str = "No categorical columns available for analysis.";
pub const NO_NUMERIC_FOR_OUTLIERS: &str = "No numerical columns available for outlier analysis.";
pub const NOT_ENOUGH_FOR_PAIRPLOT: &str = "Not enough numerical columns for pairplot.";

/// Either a chart ready for the plotting layer or an informational message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChartOutcome<T> {
    Ready(T),
    Empty { message: String },
}

impl<T> ChartOutcome<T> {
    fn empty(message: &str) -> Self {
        ChartOutcome::Empty {
            message: message.to_string(),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ChartOutcome::Ready(_))
    }

    pub fn chart(&self) -> Option<&T> {
        match self {
            ChartOutcome::Ready(chart) => Some(chart),
            ChartOutcome::Empty { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ChartOutcome::Ready(_) => None,
            ChartOutcome::Empty { message } => Some(message),
        }
    }
}

// ============================================================================
// Chart payloads
// ============================================================================

/// Annotated correlation heatmap of all numeric columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationHeatmap {
    pub columns: Vec<String>,
    /// Row-major Pearson coefficients; `None` where undefined.
    pub matrix: Vec<Vec<Option<f64>>>,
    pub color_scale: String,
    pub annotate: bool,
}

/// Histogram with a marginal box plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionChart {
    pub title: String,
    pub column: String,
    /// Non-missing values; binning is done by the plotting layer.
    pub values: Vec<f64>,
    pub bins: usize,
    pub marginal: String,
}

/// One bar of the category count chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
}

/// Bar chart of category frequencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCountChart {
    pub title: String,
    pub column: String,
    /// Axis labels: the column name and "Count".
    pub x_label: String,
    pub y_label: String,
    /// Descending by count.
    pub bars: Vec<CategoryCount>,
}

/// Box plot of one numeric column with every point drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierBoxplot {
    pub title: String,
    pub column: String,
    pub values: Vec<f64>,
    pub points: String,
}

/// Scatter matrix of all numeric columns over a row sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairwisePlot {
    pub columns: Vec<String>,
    /// Indices of the sampled rows in the cleaned table.
    pub row_indices: Vec<usize>,
    /// One vector per column, aligned with `row_indices`.
    pub values: Vec<Vec<Option<f64>>>,
    pub sampled: bool,
    pub seed: u64,
}

// ============================================================================
// Selector
// ============================================================================

/// Builds chart payloads from a table and its column partition.
pub struct ChartSelector<'a> {
    table: &'a Table,
    partition: &'a ColumnPartition,
    config: &'a EdaConfig,
}

impl<'a> ChartSelector<'a> {
    pub fn new(table: &'a Table, partition: &'a ColumnPartition, config: &'a EdaConfig) -> Self {
        Self {
            table,
            partition,
            config,
        }
    }

    /// Correlation heatmap; needs at least two numeric columns.
    pub fn heatmap(&self) -> Result<ChartOutcome<CorrelationHeatmap>> {
        if self.partition.numeric.len() < 2 {
            return Ok(ChartOutcome::empty(NOT_ENOUGH_FOR_HEATMAP));
        }

        let columns = self
            .partition
            .numeric
            .iter()
            .map(|name| self.column_f64(name))
            .collect::<Result<Vec<_>>>()?;

        Ok(ChartOutcome::Ready(CorrelationHeatmap {
            columns: self.partition.numeric.clone(),
            matrix: correlation_matrix(&columns),
            color_scale: "coolwarm".to_string(),
            annotate: true,
        }))
    }

    /// Histogram + box of the selected numeric column.
    pub fn distribution(&self, selected: Option<&str>) -> Result<ChartOutcome<DistributionChart>> {
        let Some(column) = resolve_selection(&self.partition.numeric, selected) else {
            return Ok(ChartOutcome::empty(NO_NUMERIC_FOR_DISTRIBUTION));
        };

        Ok(ChartOutcome::Ready(DistributionChart {
            title: format!("Distribution of {}", column),
            column: column.to_string(),
            values: self.column_non_null_f64(column)?,
            bins: self.config.histogram_bins,
            marginal: "box".to_string(),
        }))
    }

    /// Bar chart of value counts for the selected categorical column.
    pub fn category_counts(
        &self,
        selected: Option<&str>,
    ) -> Result<ChartOutcome<CategoryCountChart>> {
        let Some(column) = resolve_selection(&self.partition.categorical, selected) else {
            return Ok(ChartOutcome::empty(NO_CATEGORICAL_COLUMNS));
        };

        let series = self.series(column)?;
        let values = string_values(series)?.into_iter().flatten();
        let bars = value_counts_ordered(values)
            .into_iter()
            .map(|(value, count)| CategoryCount { value, count })
            .collect();

        Ok(ChartOutcome::Ready(CategoryCountChart {
            title: format!("Count Plot of {}", column),
            column: column.to_string(),
            x_label: column.to_string(),
            y_label: "Count".to_string(),
            bars,
        }))
    }

    /// Box plot of the selected numeric column.
    pub fn outliers(&self, selected: Option<&str>) -> Result<ChartOutcome<OutlierBoxplot>> {
        let Some(column) = resolve_selection(&self.partition.numeric, selected) else {
            return Ok(ChartOutcome::empty(NO_NUMERIC_FOR_OUTLIERS));
        };

        Ok(ChartOutcome::Ready(OutlierBoxplot {
            title: format!("Outlier Detection for {}", column),
            column: column.to_string(),
            values: self.column_non_null_f64(column)?,
            points: "all".to_string(),
        }))
    }

    /// Scatter matrix over a deterministic sample of at most
    /// `pairplot_sample_cap` rows; needs at least two numeric columns.
    pub fn pairwise(&self) -> Result<ChartOutcome<PairwisePlot>> {
        if self.partition.numeric.len() < 2 {
            return Ok(ChartOutcome::empty(NOT_ENOUGH_FOR_PAIRPLOT));
        }

        let cap = self.config.pairplot_sample_cap;
        let seed = self.config.sample_seed;
        let row_indices = sample_row_indices(self.table.height(), cap, seed);
        let sampled = row_indices.len() < self.table.height();
        let sample =
            take_rows(self.table.df(), &row_indices).context("Sampling rows for pairplot")?;

        let values = self
            .partition
            .numeric
            .iter()
            .map(|name| -> Result<Vec<Option<f64>>> {
                let col = sample
                    .column(name)
                    .map_err(|_| EdaError::ColumnNotFound(name.clone()))?;
                Ok(f64_values(col.as_materialized_series())?)
            })
            .collect::<Result<Vec<_>>>()?;

        if sampled {
            debug!(
                "Pairplot sampled {} of {} rows (seed {})",
                row_indices.len(),
                self.table.height(),
                seed
            );
        }

        Ok(ChartOutcome::Ready(PairwisePlot {
            columns: self.partition.numeric.clone(),
            row_indices,
            values,
            sampled,
            seed,
        }))
    }

    fn series(&self, name: &str) -> Result<&polars::prelude::Series> {
        self.table
            .df()
            .column(name)
            .map(|col| col.as_materialized_series())
            .map_err(|_| EdaError::ColumnNotFound(name.to_string()))
    }

    fn column_f64(&self, name: &str) -> Result<Vec<Option<f64>>> {
        Ok(f64_values(self.series(name)?)?)
    }

    fn column_non_null_f64(&self, name: &str) -> Result<Vec<f64>> {
        Ok(non_null_f64_values(self.series(name)?)?)
    }
}

/// Pick the column a picker shows.
///
/// The user's choice wins when it is still eligible; otherwise the picker
/// falls back to its first option. `None` when there is nothing to offer.
pub fn resolve_selection<'c>(eligible: &'c [String], requested: Option<&str>) -> Option<&'c str> {
    if let Some(requested) = requested {
        if let Some(found) = eligible.iter().find(|c| c.as_str() == requested) {
            return Some(found.as_str());
        }
        debug!("Selected column '{}' is not eligible, using default", requested);
    }
    eligible.first().map(|c| c.as_str())
}
