//! Per-file processing pipeline.
//!
//! A [`Sweeper`] drives each uploaded file through
//! `Loaded -> StatsComputed -> [Cleaned] -> Exported`, independently of
//! every other file: an unsupported extension, parse failure, or export
//! failure is folded into that file's [`FileOutcome`] and the rest of the
//! batch keeps processing.

use crate::cleaner::StatisticalImputer;
use crate::config::{ConfigValidationError, SweepConfig};
use crate::error::{Result, SweeperError};
use crate::exporter::{ExportArtifact, TableExporter};
use crate::loader::TableLoader;
use crate::profiler::TableProfiler;
use crate::reporting::{ReportDocument, ReportService};
use crate::types::{ColumnProfile, TableSummary};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One uploaded file: raw bytes plus the file name the format is detected
/// from.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Stages of per-file processing.
///
/// `Cleaned` only occurs when imputation was requested; `Exported` is
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStage {
    /// Upload received, nothing parsed yet.
    Received,
    /// Bytes parsed into a table.
    Loaded,
    /// Summary statistics computed.
    StatsComputed,
    /// Missing values imputed.
    Cleaned,
    /// Artifact serialized; no further mutation happens.
    Exported,
}

impl ProcessingStage {
    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Received => "Received",
            Self::Loaded => "Loaded",
            Self::StatsComputed => "Statistics Computed",
            Self::Cleaned => "Cleaned",
            Self::Exported => "Exported",
        }
    }
}

/// Everything that happened to one file, success or failure.
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    /// Original upload file name.
    pub file_name: String,
    /// Furthest stage the file completed.
    pub stage: ProcessingStage,
    /// Summary statistics, available from `StatsComputed` onward.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<TableSummary>,
    /// Per-column profiles of the loaded table, before any cleaning.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub column_profiles: Vec<ColumnProfile>,
    /// Imputation audit trail (empty when cleaning was not requested).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub imputation_actions: Vec<String>,
    /// Columns imputation skipped because they were entirely missing.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped_columns: Vec<String>,
    /// The exported artifact, when the file reached `Exported`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<ExportArtifact>,
    /// Opaque report from the configured report service, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ReportDocument>,
    /// Per-file error message when processing did not complete.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Stable error code matching `error`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<&'static str>,
}

impl FileOutcome {
    /// Build the outcome for a file that failed at some stage.
    fn failed(file_name: &str, stage: ProcessingStage, error: &SweeperError) -> Self {
        Self {
            file_name: file_name.to_string(),
            stage,
            summary: None,
            column_profiles: Vec::new(),
            imputation_actions: Vec::new(),
            skipped_columns: Vec::new(),
            artifact: None,
            report: None,
            error: Some(error.to_string()),
            error_code: Some(error.error_code()),
        }
    }

    /// Whether the file completed the full pipeline.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// The per-file processing pipeline.
///
/// Use [`Sweeper::builder()`] to create one with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// use data_sweeper::{ExportFormat, FileUpload, SweepConfig, Sweeper};
///
/// let sweeper = Sweeper::builder()
///     .config(
///         SweepConfig::builder()
///             .impute_missing(true)
///             .export_format(ExportFormat::Excel)
///             .build()?,
///     )
///     .build()?;
///
/// let outcomes = sweeper.process_files(&uploads);
/// for outcome in &outcomes {
///     match &outcome.error {
///         None => println!("{} -> {}", outcome.file_name, outcome.artifact.as_ref().unwrap().file_name),
///         Some(err) => eprintln!("{}: {}", outcome.file_name, err),
///     }
/// }
/// ```
pub struct Sweeper {
    config: SweepConfig,
    loader: TableLoader,
    report_service: Option<Arc<dyn ReportService>>,
}

// Sweepers move freely to caller threads; files are independent so callers
// may process them in parallel without coordination.
static_assertions::assert_impl_all!(Sweeper: Send, Sync);

impl Sweeper {
    /// Create a new sweeper builder.
    pub fn builder() -> SweeperBuilder {
        SweeperBuilder::default()
    }

    /// The active configuration.
    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Process a single uploaded file through the full pipeline.
    ///
    /// # Errors
    ///
    /// Returns the per-file error (unsupported format, parse failure,
    /// serialization failure). Nothing is retried; the caller decides
    /// whether to skip the file or surface the message.
    pub fn process_file(&self, upload: &FileUpload) -> Result<FileOutcome> {
        info!("Processing '{}' ({} bytes)", upload.name, upload.bytes.len());

        let table = self.loader.load(&upload.bytes, &upload.name)?;
        debug!(
            "'{}' loaded: {} rows x {} columns",
            upload.name,
            table.height(),
            table.width()
        );

        let summary = TableProfiler::summarize(&table);
        let column_profiles =
            TableProfiler::profile_columns(&table, self.config.max_sample_values)?;

        let (table, imputation_actions, skipped_columns) = if self.config.impute_missing {
            let outcome = StatisticalImputer::impute(&table)?;
            (outcome.table, outcome.actions, outcome.skipped)
        } else {
            (table, Vec::new(), Vec::new())
        };

        // The report boundary is best-effort: a failing report service
        // never blocks the file itself.
        let report = match &self.report_service {
            Some(service) => match service.generate(&table) {
                Ok(document) => Some(document),
                Err(e) => {
                    warn!(
                        "Report service '{}' failed for '{}': {}",
                        service.name(),
                        upload.name,
                        e
                    );
                    None
                }
            },
            None => None,
        };

        let artifact = TableExporter::export(&table, self.config.export_format, &upload.name)?;
        info!("Exported '{}' as '{}'", upload.name, artifact.file_name);

        Ok(FileOutcome {
            file_name: upload.name.clone(),
            stage: ProcessingStage::Exported,
            summary: Some(summary),
            column_profiles,
            imputation_actions,
            skipped_columns,
            artifact: Some(artifact),
            report,
            error: None,
            error_code: None,
        })
    }

    /// Process a batch of uploads, one outcome per file.
    ///
    /// Files are independent: a failure is recorded in that file's outcome
    /// and the remaining files keep processing.
    pub fn process_files(&self, uploads: &[FileUpload]) -> Vec<FileOutcome> {
        uploads
            .iter()
            .map(|upload| match self.process_file(upload) {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!("Skipping '{}': {}", upload.name, e);
                    FileOutcome::failed(&upload.name, self.stage_reached(&e), &e)
                }
            })
            .collect()
    }

    /// The furthest stage a file is guaranteed to have completed given the
    /// error it failed with.
    fn stage_reached(&self, error: &SweeperError) -> ProcessingStage {
        match error {
            SweeperError::Serialization { .. } => {
                if self.config.impute_missing {
                    ProcessingStage::Cleaned
                } else {
                    ProcessingStage::StatsComputed
                }
            }
            _ => ProcessingStage::Received,
        }
    }
}

/// Builder for creating a [`Sweeper`] instance.
#[derive(Default)]
pub struct SweeperBuilder {
    config: Option<SweepConfig>,
    report_service: Option<Arc<dyn ReportService>>,
}

impl SweeperBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: SweepConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Attach an external profiling-report service.
    ///
    /// The service runs once per file on whichever table is active after
    /// optional cleaning. Use `Arc` so the service can be shared across
    /// sweepers.
    pub fn report_service(mut self, service: Arc<dyn ReportService>) -> Self {
        self.report_service = Some(service);
        self
    }

    /// Build the sweeper.
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> std::result::Result<Sweeper, ConfigValidationError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let loader = TableLoader::new(config.infer_schema_length);

        Ok(Sweeper {
            config,
            loader,
            report_service: self.report_service,
        })
    }
}
