//! Profiling-report service boundary.
//!
//! The automated profiling-report generator is an external collaborator:
//! the pipeline hands it a [`Table`] and gets back an opaque renderable
//! document it never inspects. This module defines that narrow interface
//! so the core carries no dependency on any report generator's internals.
//!
//! # Implementing a Report Service
//!
//! ```rust,ignore
//! use data_sweeper::{ReportDocument, ReportService, Table};
//! use data_sweeper::error::Result;
//!
//! struct RowCountReport;
//!
//! impl ReportService for RowCountReport {
//!     fn generate(&self, table: &Table) -> Result<ReportDocument> {
//!         Ok(ReportDocument::new(serde_json::json!({
//!             "rows": table.height(),
//!         })))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "row-count"
//!     }
//! }
//! ```

use crate::error::Result;
use crate::types::Table;
use serde::{Deserialize, Serialize};

/// An opaque renderable report produced by a [`ReportService`].
///
/// The pipeline stores and forwards this value without looking inside.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDocument(serde_json::Value);

impl ReportDocument {
    /// Wrap a renderable value.
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Unwrap the renderable value for display.
    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }
}

/// Trait for external profiling-report generators.
///
/// Implementations must be `Send + Sync` so a report service can be shared
/// behind an `Arc` across caller threads.
pub trait ReportService: Send + Sync {
    /// Produce a report for a table.
    ///
    /// Failures are surfaced to the pipeline, which treats them as
    /// non-fatal: the file keeps processing without a report.
    fn generate(&self, table: &Table) -> Result<ReportDocument>;

    /// Service name for logging.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_document_round_trip() {
        let doc = ReportDocument::new(serde_json::json!({"rows": 3}));
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(json, "{\"rows\":3}");

        let back: ReportDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back.into_inner()["rows"], 3);
    }
}
