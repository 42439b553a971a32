//! Configuration for the EDA engine.
//!
//! The user-facing surface is deliberately small (two toggles and three
//! pickers, see [`crate::session`]). Everything here is an engine knob with
//! a default matching the dashboard's behavior.

use serde::{Deserialize, Serialize};

/// Default number of rows shown in the dataset preview.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;
/// Default histogram bin count handed to the plotting layer.
pub const DEFAULT_HISTOGRAM_BINS: usize = 30;
/// Default cap on rows used by the pairwise plot.
pub const DEFAULT_PAIRPLOT_SAMPLE_CAP: usize = 200;
/// Default seed for the pairwise plot sample.
pub const DEFAULT_SAMPLE_SEED: u64 = 42;
/// Default number of rows the CSV reader inspects to infer column types.
pub const DEFAULT_INFER_SCHEMA_LENGTH: usize = 100;

/// Configuration for ingestion, profiling and chart selection.
///
/// Use [`EdaConfig::builder()`] for a validated configuration.
///
/// # Example
///
/// ```rust,ignore
/// use auto_eda::EdaConfig;
///
/// let config = EdaConfig::builder()
///     .pairplot_sample_cap(500)
///     .sample_seed(7)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdaConfig {
    /// Rows shown in the dataset preview.
    /// Default: 5
    pub preview_rows: usize,

    /// Number of histogram bins requested for the distribution chart.
    /// Default: 30
    pub histogram_bins: usize,

    /// Tables with more rows than this are sampled for the pairwise plot.
    /// Default: 200
    pub pairplot_sample_cap: usize,

    /// Seed used for the pairwise plot sample.
    /// Default: 42
    pub sample_seed: u64,

    /// Rows inspected by the CSV reader for type inference.
    /// `None` scans the whole file.
    /// Default: Some(100)
    pub infer_schema_length: Option<usize>,
}

impl Default for EdaConfig {
    fn default() -> Self {
        Self {
            preview_rows: DEFAULT_PREVIEW_ROWS,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            pairplot_sample_cap: DEFAULT_PAIRPLOT_SAMPLE_CAP,
            sample_seed: DEFAULT_SAMPLE_SEED,
            infer_schema_length: Some(DEFAULT_INFER_SCHEMA_LENGTH),
        }
    }
}

impl EdaConfig {
    /// Create a new configuration builder.
    pub fn builder() -> EdaConfigBuilder {
        EdaConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.preview_rows == 0 {
            return Err(ConfigValidationError::MustBePositive {
                field: "preview_rows".to_string(),
            });
        }

        if self.histogram_bins == 0 {
            return Err(ConfigValidationError::MustBePositive {
                field: "histogram_bins".to_string(),
            });
        }

        // A pairwise plot needs at least two points.
        if self.pairplot_sample_cap < 2 {
            return Err(ConfigValidationError::InvalidSampleCap(
                self.pairplot_sample_cap,
            ));
        }

        if self.infer_schema_length == Some(0) {
            return Err(ConfigValidationError::MustBePositive {
                field: "infer_schema_length".to_string(),
            });
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid value for '{field}': must be at least 1")]
    MustBePositive { field: String },

    #[error("Invalid pairplot sample cap: {0} (must be at least 2)")]
    InvalidSampleCap(usize),
}

/// Builder for [`EdaConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct EdaConfigBuilder {
    preview_rows: Option<usize>,
    histogram_bins: Option<usize>,
    pairplot_sample_cap: Option<usize>,
    sample_seed: Option<u64>,
    infer_schema_length: Option<Option<usize>>,
}

impl EdaConfigBuilder {
    /// Set the number of preview rows.
    pub fn preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = Some(rows);
        self
    }

    /// Set the histogram bin count.
    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = Some(bins);
        self
    }

    /// Set the row cap above which the pairwise plot is sampled.
    pub fn pairplot_sample_cap(mut self, cap: usize) -> Self {
        self.pairplot_sample_cap = Some(cap);
        self
    }

    /// Set the seed of the pairwise plot sample.
    pub fn sample_seed(mut self, seed: u64) -> Self {
        self.sample_seed = Some(seed);
        self
    }

    /// Set how many rows the CSV reader uses for type inference.
    ///
    /// `None` makes the reader scan the full file.
    pub fn infer_schema_length(mut self, rows: Option<usize>) -> Self {
        self.infer_schema_length = Some(rows);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `EdaConfig` or an error if validation fails.
    pub fn build(self) -> Result<EdaConfig, ConfigValidationError> {
        let config = EdaConfig {
            preview_rows: self.preview_rows.unwrap_or(DEFAULT_PREVIEW_ROWS),
            histogram_bins: self.histogram_bins.unwrap_or(DEFAULT_HISTOGRAM_BINS),
            pairplot_sample_cap: self
                .pairplot_sample_cap
                .unwrap_or(DEFAULT_PAIRPLOT_SAMPLE_CAP),
            sample_seed: self.sample_seed.unwrap_or(DEFAULT_SAMPLE_SEED),
            infer_schema_length: self
                .infer_schema_length
                .unwrap_or(Some(DEFAULT_INFER_SCHEMA_LENGTH)),
        };

        config.validate()?;
        Ok(config)
    }
}

impl From<ConfigValidationError> for crate::error::EdaError {
    fn from(err: ConfigValidationError) -> Self {
        crate::error::EdaError::InvalidConfig(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EdaConfig::default();
        assert_eq!(config.preview_rows, 5);
        assert_eq!(config.histogram_bins, 30);
        assert_eq!(config.pairplot_sample_cap, 200);
        assert_eq!(config.sample_seed, 42);
        assert_eq!(config.infer_schema_length, Some(100));
    }

    #[test]
    fn test_builder_defaults_match_default() {
        let config = EdaConfig::builder().build().unwrap();
        assert_eq!(config, EdaConfig::default());
    }

    #[test]
    fn test_builder_custom_values() {
        let config = EdaConfig::builder()
            .preview_rows(10)
            .histogram_bins(12)
            .pairplot_sample_cap(50)
            .sample_seed(7)
            .infer_schema_length(None)
            .build()
            .unwrap();

        assert_eq!(config.preview_rows, 10);
        assert_eq!(config.histogram_bins, 12);
        assert_eq!(config.pairplot_sample_cap, 50);
        assert_eq!(config.sample_seed, 7);
        assert_eq!(config.infer_schema_length, None);
    }

    #[test]
    fn test_validation_zero_preview_rows() {
        let result = EdaConfig::builder().preview_rows(0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::MustBePositive { .. }
        ));
    }

    #[test]
    fn test_validation_sample_cap() {
        let result = EdaConfig::builder().pairplot_sample_cap(1).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidSampleCap(1)
        ));
    }

    #[test]
    fn test_validation_zero_schema_length() {
        let result = EdaConfig::builder().infer_schema_length(Some(0)).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "preview_rows": 3,
            "histogram_bins": 20,
            "pairplot_sample_cap": 100,
            "sample_seed": 1,
            "infer_schema_length": null
        }"#;

        let config: EdaConfig = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(config.preview_rows, 3);
        assert_eq!(config.histogram_bins, 20);
        assert_eq!(config.pairplot_sample_cap, 100);
        assert_eq!(config.sample_seed, 1);
        assert_eq!(config.infer_schema_length, None);
        assert!(config.validate().is_ok());
    }
}
