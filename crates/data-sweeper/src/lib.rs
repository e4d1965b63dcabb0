//! Tabular File Cleaning Library
//!
//! Ingest CSV/XLSX uploads, inspect missing-value statistics, fill gaps
//! with simple statistical imputation, and re-export as CSV or Excel,
//! built with Rust and Polars.
//!
//! # Overview
//!
//! Each uploaded file moves through an independent pipeline:
//!
//! - **Loading**: format detection by extension, parsing into a [`Table`]
//!   with per-column type tags fixed at load time
//! - **Profiling**: row/column counts and a missing-value report
//! - **Cleaning** (on request): mean imputation for numeric columns, most
//!   frequent value for categorical columns
//! - **Export**: CSV or single-sheet Excel artifact with the right file
//!   name and MIME type
//!
//! Files never share state; a failure in one file is reported per-file
//! and the rest of a batch keeps going.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use data_sweeper::{ExportFormat, FileUpload, SweepConfig, Sweeper};
//!
//! let sweeper = Sweeper::builder()
//!     .config(
//!         SweepConfig::builder()
//!             .impute_missing(true)
//!             .export_format(ExportFormat::Excel)
//!             .build()?,
//!     )
//!     .build()?;
//!
//! let upload = FileUpload::new("data.csv", std::fs::read("data.csv")?);
//! let outcome = sweeper.process_file(&upload)?;
//!
//! let summary = outcome.summary.unwrap();
//! println!("{} rows x {} columns", summary.row_count, summary.column_count);
//! for entry in &summary.missing {
//!     println!("  {}: {} missing values", entry.column, entry.count);
//! }
//!
//! let artifact = outcome.artifact.unwrap();
//! std::fs::write(&artifact.file_name, &artifact.bytes)?;
//! ```
//!
//! # Components
//!
//! The pipeline pieces are usable on their own: [`TableLoader`] for
//! parsing, [`TableProfiler`] for statistics, [`StatisticalImputer`] for
//! imputation, and [`TableExporter`] for serialization. An optional
//! profiling-report generator plugs in behind the [`ReportService`] trait
//! without the core depending on its internals.

pub mod cleaner;
pub mod config;
pub mod error;
pub mod exporter;
pub mod loader;
pub mod pipeline;
pub mod profiler;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use cleaner::StatisticalImputer;
pub use config::{ConfigValidationError, SweepConfig, SweepConfigBuilder};
pub use error::{Result, SweeperError};
pub use exporter::{ExportArtifact, ExportFormat, TableExporter};
pub use loader::{FileFormat, TableLoader};
pub use pipeline::{FileOutcome, FileUpload, ProcessingStage, Sweeper, SweeperBuilder};
pub use profiler::TableProfiler;
pub use reporting::{ReportDocument, ReportService};
pub use types::{
    ColumnKind, ColumnProfile, ImputationOutcome, MissingCount, Table, TableSummary,
};
pub use utils::{
    anyvalue_display, collect_sample_values, fill_numeric_nulls, fill_string_nulls,
    is_numeric_dtype, string_mode,
};
