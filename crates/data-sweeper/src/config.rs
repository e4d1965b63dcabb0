//! Configuration for the file cleaning pipeline.
//!
//! Uses the builder pattern for ergonomic setup with validation at
//! build time.

use crate::exporter::ExportFormat;
use serde::{Deserialize, Serialize};

/// Configuration for a [`Sweeper`](crate::pipeline::Sweeper).
///
/// Use [`SweepConfig::builder()`] for a fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use data_sweeper::{ExportFormat, SweepConfig};
///
/// let config = SweepConfig::builder()
///     .impute_missing(true)
///     .export_format(ExportFormat::Excel)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Whether to fill missing values before export.
    /// Imputation only runs when explicitly requested.
    /// Default: false
    pub impute_missing: bool,

    /// Output format for exported artifacts.
    /// Default: Csv
    pub export_format: ExportFormat,

    /// Number of CSV rows scanned for schema inference.
    /// `None` scans the whole file.
    /// Default: Some(100)
    pub infer_schema_length: Option<usize>,

    /// Maximum sample values collected per column profile.
    /// Default: 10
    pub max_sample_values: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            impute_missing: false,
            export_format: ExportFormat::default(),
            infer_schema_length: Some(100),
            max_sample_values: 10,
        }
    }
}

impl SweepConfig {
    /// Create a new configuration builder.
    pub fn builder() -> SweepConfigBuilder {
        SweepConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.infer_schema_length == Some(0) {
            return Err(ConfigValidationError::InvalidInferSchemaLength);
        }

        if self.max_sample_values == 0 {
            return Err(ConfigValidationError::InvalidSampleCount(
                self.max_sample_values,
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid infer_schema_length: Some(0) (use None to scan the whole file)")]
    InvalidInferSchemaLength,

    #[error("Invalid max_sample_values: {0} (must be at least 1)")]
    InvalidSampleCount(usize),
}

/// Builder for [`SweepConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct SweepConfigBuilder {
    impute_missing: Option<bool>,
    export_format: Option<ExportFormat>,
    infer_schema_length: Option<Option<usize>>,
    max_sample_values: Option<usize>,
}

impl SweepConfigBuilder {
    /// Enable or disable missing-value imputation before export.
    pub fn impute_missing(mut self, impute: bool) -> Self {
        self.impute_missing = Some(impute);
        self
    }

    /// Set the output format for exported artifacts.
    pub fn export_format(mut self, format: ExportFormat) -> Self {
        self.export_format = Some(format);
        self
    }

    /// Set how many CSV rows are scanned for schema inference.
    ///
    /// `None` scans the whole file.
    pub fn infer_schema_length(mut self, length: Option<usize>) -> Self {
        self.infer_schema_length = Some(length);
        self
    }

    /// Set the maximum number of sample values per column profile.
    pub fn max_sample_values(mut self, count: usize) -> Self {
        self.max_sample_values = Some(count);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `SweepConfig` or an error if validation fails.
    pub fn build(self) -> Result<SweepConfig, ConfigValidationError> {
        let config = SweepConfig {
            impute_missing: self.impute_missing.unwrap_or(false),
            export_format: self.export_format.unwrap_or_default(),
            infer_schema_length: self.infer_schema_length.unwrap_or(Some(100)),
            max_sample_values: self.max_sample_values.unwrap_or(10),
        };

        config.validate()?;
        Ok(config)
    }
}
