use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

// ============================================================================
// Table
// ============================================================================

/// The working dataset of a session.
///
/// A `Table` is an owned, versioned value. Cleaning never mutates it; it
/// derives a new `Table` whose version is one higher, so a render pass can
/// always tell the uploaded data from the cleaned data.
#[derive(Debug, Clone)]
pub struct Table {
    df: DataFrame,
    source_name: String,
    version: u64,
}

impl Table {
    /// Wrap a freshly ingested DataFrame. The version starts at 0.
    pub fn new(df: DataFrame, source_name: impl Into<String>) -> Self {
        Self {
            df,
            source_name: source_name.into(),
            version: 0,
        }
    }

    /// Create the next version of this table from a transformed DataFrame.
    pub(crate) fn derive(&self, df: DataFrame) -> Self {
        Self {
            df,
            source_name: self.source_name.clone(),
            version: self.version + 1,
        }
    }

    pub fn df(&self) -> &DataFrame {
        &self.df
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Number of data rows.
    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.df.width()
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }
}

// ============================================================================
// Column typing
// ============================================================================

/// Chart-eligibility class of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Machine integer or floating point column.
    Numeric,
    /// Everything else: text, boolean, dates, all-null columns.
    Categorical,
}

/// Type tag of a single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnType {
    pub name: String,
    /// Polars dtype as inferred by the reader (e.g. "Int64", "String").
    pub dtype: String,
    pub kind: ColumnKind,
}

// ============================================================================
// Profiling results
// ============================================================================

/// Descriptive statistics of one column.
///
/// Numeric columns fill `mean` through `max`; categorical columns fill
/// `unique`, `top` and `freq`. A statistic that is undefined for the data
/// (mean of an empty column, std of a single value) is `None`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DescribeRow {
    pub column: String,
    /// Number of non-missing values.
    pub count: usize,
    pub unique: Option<usize>,
    pub top: Option<String>,
    pub freq: Option<usize>,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    #[serde(rename = "25%")]
    pub q25: Option<f64>,
    #[serde(rename = "50%")]
    pub median: Option<f64>,
    #[serde(rename = "75%")]
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// Everything the profiler knows about one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    pub dtype: String,
    pub kind: ColumnKind,
    pub missing_count: usize,
    pub stats: DescribeRow,
}

/// One column of a non-empty [`MissingReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingEntry {
    pub column: String,
    pub count: usize,
}

/// Missing values per column.
///
/// `Empty` is the explicit "no missing values" state. A report that has not
/// been computed yet is represented by the absence of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "columns", rename_all = "snake_case")]
pub enum MissingReport {
    Empty,
    /// Columns with at least one missing value, by descending count.
    Columns(Vec<MissingEntry>),
}

impl MissingReport {
    pub fn is_empty(&self) -> bool {
        matches!(self, MissingReport::Empty)
    }

    pub fn entries(&self) -> &[MissingEntry] {
        match self {
            MissingReport::Empty => &[],
            MissingReport::Columns(entries) => entries,
        }
    }
}

// ============================================================================
// User controls
// ============================================================================

/// A user-toggleable cleaning operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningOp {
    /// Remove every row that has a missing value in any column.
    DropMissing,
    /// Fill missing numeric values with the column mean.
    ImputeMean,
}

impl CleaningOp {
    /// Label of the checkbox that controls this operation.
    pub fn label(&self) -> &'static str {
        match self {
            CleaningOp::DropMissing => "Drop rows with missing values?",
            CleaningOp::ImputeMean => "Fill missing values with column mean (numeric only)?",
        }
    }
}

/// Enabled cleaning operations in the order the user enabled them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleState {
    order: Vec<CleaningOp>,
}

impl ToggleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a toggle state from an explicit order. Duplicates are ignored.
    pub fn from_order(ops: impl IntoIterator<Item = CleaningOp>) -> Self {
        let mut state = Self::new();
        for op in ops {
            state.set(op, true);
        }
        state
    }

    /// Enable or disable an operation.
    ///
    /// Enabling appends it to the end of the order; re-enabling an already
    /// enabled operation keeps its original position.
    pub fn set(&mut self, op: CleaningOp, enabled: bool) {
        let present = self.order.contains(&op);
        if enabled && !present {
            self.order.push(op);
        } else if !enabled && present {
            self.order.retain(|existing| *existing != op);
        }
    }

    pub fn is_enabled(&self, op: CleaningOp) -> bool {
        self.order.contains(&op)
    }

    /// Enabled operations in application order.
    pub fn ops(&self) -> &[CleaningOp] {
        &self.order
    }
}

/// The column pickers of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Picker {
    Distribution,
    Category,
    Outlier,
}

/// Transient picker choices. `None` means "use the picker's default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub distribution_column: Option<String>,
    pub category_column: Option<String>,
    pub outlier_column: Option<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, picker: Picker, column: Option<String>) {
        match picker {
            Picker::Distribution => self.distribution_column = column,
            Picker::Category => self.category_column = column,
            Picker::Outlier => self.outlier_column = column,
        }
    }

    pub fn get(&self, picker: Picker) -> Option<&str> {
        match picker {
            Picker::Distribution => self.distribution_column.as_deref(),
            Picker::Category => self.category_column.as_deref(),
            Picker::Outlier => self.outlier_column.as_deref(),
        }
    }
}
