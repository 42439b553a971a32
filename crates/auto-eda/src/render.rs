//! Render plan assembly.
//!
//! [`render`] is a pure function of the uploaded table, the toggle and
//! selection state, and the config. It re-runs from scratch on every user
//! interaction; the display layer only walks the returned sections in order.

use crate::charts::{
    CategoryCountChart, ChartOutcome, ChartSelector, CorrelationHeatmap, DistributionChart,
    OutlierBoxplot, PairwisePlot,
};
use crate::classifier::ColumnPartition;
use crate::cleaner::{AppliedCleaning, DataCleaner};
use crate::config::EdaConfig;
use crate::error::{EdaError, Result, ResultExt};
use crate::profiler::DataProfiler;
use crate::types::{ColumnType, DescribeRow, MissingReport, Picker, SelectionState, Table, ToggleState};
use crate::utils::string_values;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const UPLOAD_SUCCESS: &str = "File uploaded successfully!";
pub const NO_MISSING_VALUES: &str = "No missing values detected";
pub const AWAITING_UPLOAD: &str = "Please upload a CSV file to start the EDA.";
pub const EDA_COMPLETED: &str =
    "EDA completed. You can extend this app with ML models, feature engineering, etc.";

/// Severity of a plain message block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// The content of one dashboard section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum SectionBody {
    Message {
        level: MessageLevel,
        text: String,
    },
    /// First rows of the uploaded table as display strings.
    Preview {
        columns: Vec<String>,
        rows: Vec<Vec<Option<String>>>,
    },
    Information {
        dtypes: Vec<ColumnType>,
        rows: usize,
        columns: usize,
        shape_text: String,
    },
    Missing(MissingReport),
    Describe(Vec<DescribeRow>),
    /// One entry per applied cleaning operation, in application order.
    Cleaning(Vec<AppliedCleaning>),
    Heatmap(ChartOutcome<CorrelationHeatmap>),
    Distribution(ChartOutcome<DistributionChart>),
    CategoryCounts(ChartOutcome<CategoryCountChart>),
    Outliers(ChartOutcome<OutlierBoxplot>),
    Pairwise(ChartOutcome<PairwisePlot>),
}

/// A titled block of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Heading shown above the block; `None` for bare messages.
    pub title: Option<String>,
    pub body: SectionBody,
}

impl Section {
    fn titled(title: &str, body: SectionBody) -> Self {
        Self {
            title: Some(title.to_string()),
            body,
        }
    }

    fn message(level: MessageLevel, text: impl Into<String>) -> Self {
        Self {
            title: None,
            body: SectionBody::Message {
                level,
                text: text.into(),
            },
        }
    }
}

/// Ordered description of everything the dashboard shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderPlan {
    /// RFC 3339 timestamp of this render pass.
    pub generated_at: String,
    pub source_name: Option<String>,
    /// Version of the cleaned table the charts were built from.
    pub table_version: Option<u64>,
    pub sections: Vec<Section>,
}

static_assertions::assert_impl_all!(RenderPlan: Send, Sync);

impl RenderPlan {
    fn new(source_name: Option<String>, table_version: Option<u64>, sections: Vec<Section>) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            source_name,
            table_version,
            sections,
        }
    }

    /// Plan shown before any table has been uploaded.
    pub fn awaiting_upload() -> Self {
        Self::new(None, None, vec![Section::message(MessageLevel::Warning, AWAITING_UPLOAD)])
    }

    /// Plan shown when an upload could not be ingested.
    pub fn ingestion_failed(error: &EdaError) -> Self {
        Self::new(
            None,
            None,
            vec![
                Section::message(MessageLevel::Error, error.to_string()),
                Section::message(MessageLevel::Warning, AWAITING_UPLOAD),
            ],
        )
    }

    /// Pretty-printed JSON document for the display layer.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Whether this plan shows the dashboard for a loaded table.
    pub fn has_table(&self) -> bool {
        self.table_version.is_some()
    }

    /// Section headings in order, skipping bare messages.
    pub fn titles(&self) -> Vec<&str> {
        self.sections
            .iter()
            .filter_map(|s| s.title.as_deref())
            .collect()
    }

    /// Find the section with the given heading.
    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|s| s.title.as_deref() == Some(title))
    }
}

/// Section headings, in render order.
pub mod titles {
    pub const PREVIEW: &str = "Dataset Preview";
    pub const INFORMATION: &str = "Dataset Information";
    pub const MISSING: &str = "Missing Values";
    pub const DESCRIBE: &str = "Descriptive Statistics";
    pub const CLEANING: &str = "Data Cleaning";
    pub const HEATMAP: &str = "Correlation Heatmap (Numerical Features)";
    pub const DISTRIBUTION: &str = "Distribution of Numerical Features";
    pub const CATEGORICAL: &str = "Categorical Feature Analysis";
    pub const OUTLIERS: &str = "Outlier Detection (Boxplot)";
    pub const PAIRWISE: &str = "Pairplot (Sampled)";
}

/// Build the full dashboard for an uploaded table.
///
/// Preview, information, missing values and descriptive statistics describe
/// `table` as uploaded. Every chart is built from the table after the
/// enabled cleaning operations ran, with the column partition recomputed.
pub fn render(
    table: &Table,
    toggles: &ToggleState,
    selection: &SelectionState,
    config: &EdaConfig,
) -> Result<RenderPlan> {
    let mut sections = Vec::with_capacity(12);
    sections.push(Section::message(MessageLevel::Success, UPLOAD_SUCCESS));

    sections.push(Section::titled(
        titles::PREVIEW,
        preview(table, config.preview_rows).context("Building dataset preview")?,
    ));

    let (rows, columns) = DataProfiler::shape(table);
    sections.push(Section::titled(
        titles::INFORMATION,
        SectionBody::Information {
            dtypes: DataProfiler::dtypes(table),
            rows,
            columns,
            shape_text: format!("Shape of dataset: {} rows, {} columns", rows, columns),
        },
    ));

    let missing = DataProfiler::missing_report(table);
    let missing_body = if missing.is_empty() {
        SectionBody::Message {
            level: MessageLevel::Success,
            text: NO_MISSING_VALUES.to_string(),
        }
    } else {
        SectionBody::Missing(missing)
    };
    sections.push(Section::titled(titles::MISSING, missing_body));

    sections.push(Section::titled(
        titles::DESCRIBE,
        SectionBody::Describe(DataProfiler::describe(table)?),
    ));

    let cleaned = DataCleaner::apply(table, toggles)?;
    sections.push(Section::titled(
        titles::CLEANING,
        SectionBody::Cleaning(cleaned.applied),
    ));

    let working = &cleaned.table;
    let partition = ColumnPartition::from_table(working);
    let selector = ChartSelector::new(working, &partition, config);
    debug!(
        "Charting table v{}: {} numeric, {} categorical columns",
        working.version(),
        partition.numeric.len(),
        partition.categorical.len()
    );

    sections.push(Section::titled(
        titles::HEATMAP,
        SectionBody::Heatmap(selector.heatmap()?),
    ));
    sections.push(Section::titled(
        titles::DISTRIBUTION,
        SectionBody::Distribution(selector.distribution(selection.get(Picker::Distribution))?),
    ));
    sections.push(Section::titled(
        titles::CATEGORICAL,
        SectionBody::CategoryCounts(selector.category_counts(selection.get(Picker::Category))?),
    ));
    sections.push(Section::titled(
        titles::OUTLIERS,
        SectionBody::Outliers(selector.outliers(selection.get(Picker::Outlier))?),
    ));
    sections.push(Section::titled(
        titles::PAIRWISE,
        SectionBody::Pairwise(selector.pairwise()?),
    ));

    sections.push(Section::message(MessageLevel::Info, EDA_COMPLETED));

    Ok(RenderPlan::new(
        Some(table.source_name().to_string()),
        Some(working.version()),
        sections,
    ))
}

fn preview(table: &Table, rows: usize) -> Result<SectionBody> {
    let head = table.df().head(Some(rows));
    let columns = table.column_names();

    let cells = head
        .get_columns()
        .iter()
        .map(|col| string_values(col.as_materialized_series()))
        .collect::<polars::prelude::PolarsResult<Vec<_>>>()?;

    let rows = (0..head.height())
        .map(|row| cells.iter().map(|col| col[row].clone()).collect())
        .collect();

    Ok(SectionBody::Preview { columns, rows })
}
