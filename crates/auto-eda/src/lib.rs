//! Automated Exploratory Data Analysis Engine
//!
//! Turns an uploaded CSV table into an ordered dashboard description, built
//! with Rust and Polars.
//!
//! # Overview
//!
//! - **Ingestion**: CSV bytes to a typed, versioned [`Table`]
//! - **Profiling**: Shape, column types, missing values and descriptive statistics
//! - **Cleaning**: Optional row dropping and mean imputation, applied in toggle order
//! - **Charts**: Correlation heatmap, distribution, category counts, outliers and
//!   a sampled pairwise plot, with an informational message when a chart has no
//!   eligible columns
//! - **Rendering**: A serializable [`RenderPlan`] the display layer walks top to bottom
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use auto_eda::{CleaningOp, EdaConfig, Picker, Session};
//!
//! let mut session = Session::new(EdaConfig::default())?;
//! let plan = session.upload(&std::fs::read("data.csv")?, "data.csv")?;
//!
//! session.set_toggle(CleaningOp::ImputeMean, true);
//! session.select(Picker::Distribution, Some("price".to_string()));
//! let plan = session.render()?;
//!
//! println!("{}", plan.to_json()?);
//! ```
//!
//! # Stateless use
//!
//! [`render`] is a plain function of its inputs, so a host that keeps its own
//! state can skip [`Session`]:
//!
//! ```rust,ignore
//! use auto_eda::*;
//!
//! let config = EdaConfig::default();
//! let table = read_csv(bytes, "upload.csv", &config)?;
//! let toggles = ToggleState::from_order([CleaningOp::DropMissing]);
//! let plan = render(&table, &toggles, &SelectionState::new(), &config)?;
//! ```
//!
//! # Configuration
//!
//! ```rust,ignore
//! let config = EdaConfig::builder()
//!     .preview_rows(10)
//!     .pairplot_sample_cap(500)
//!     .sample_seed(7)
//!     .build()?;
//! ```

pub mod charts;
pub mod classifier;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod imputers;
pub mod ingest;
pub mod profiler;
pub mod render;
pub mod session;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use charts::{
    CategoryCount, CategoryCountChart, ChartOutcome, ChartSelector, CorrelationHeatmap,
    DistributionChart, OutlierBoxplot, PairwisePlot, resolve_selection,
};
pub use classifier::ColumnPartition;
pub use cleaner::{AppliedCleaning, CleaningOutcome, DataCleaner};
pub use config::{ConfigValidationError, EdaConfig, EdaConfigBuilder};
pub use error::{EdaError, Result as EdaResult, ResultExt};
pub use imputers::StatisticalImputer;
pub use ingest::{read_csv, read_csv_file};
pub use profiler::DataProfiler;
pub use render::{MessageLevel, RenderPlan, Section, SectionBody, render};
pub use session::Session;
pub use types::{
    CleaningOp, ColumnKind, ColumnProfile, ColumnType, DescribeRow, MissingEntry, MissingReport,
    Picker, SelectionState, Table, ToggleState,
};
