//! Table serialization into downloadable artifacts.
//!
//! Supports CSV (via the Polars writer) and Excel (a single-sheet OOXML
//! package assembled in memory). Every artifact carries the output file
//! name (original base name, new extension) and the matching MIME type.

mod xlsx;

use crate::error::{Result, SweeperError};
use crate::types::Table;
use polars::prelude::*;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Target format for an export request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Comma-delimited text with a header row.
    #[default]
    Csv,
    /// Single-sheet Office Open XML workbook.
    Excel,
}

impl ExportFormat {
    /// File extension for the format (without the dot).
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Excel => "xlsx",
        }
    }

    /// MIME type for the format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Excel => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }
}

/// A serialized table ready for download: bytes, output file name, and
/// MIME type. Immutable once created.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime_type: &'static str,
}

/// Serialize implementation for display layers.
///
/// The raw buffer is summarized as a byte count; a frontend fetches the
/// bytes separately rather than through JSON.
impl Serialize for ExportArtifact {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ExportArtifact", 3)?;
        state.serialize_field("file_name", &self.file_name)?;
        state.serialize_field("mime_type", &self.mime_type)?;
        state.serialize_field("num_bytes", &self.bytes.len())?;
        state.end()
    }
}

static_assertions::assert_impl_all!(ExportArtifact: Send, Sync);

/// Serializes a [`Table`] into an [`ExportArtifact`].
pub struct TableExporter;

impl TableExporter {
    /// Export a table in the requested format.
    ///
    /// The output file name is the original base name with the extension
    /// replaced. Fails with [`SweeperError::Serialization`] when a cell
    /// value cannot be encoded in the target format; the table itself is
    /// untouched, so the caller may retry with a different format.
    pub fn export(
        table: &Table,
        format: ExportFormat,
        original_file_name: &str,
    ) -> Result<ExportArtifact> {
        let file_name = output_file_name(original_file_name, format.extension());

        let bytes = match format {
            ExportFormat::Csv => write_csv(table, original_file_name)?,
            ExportFormat::Excel => xlsx::write_workbook(table.dataframe(), original_file_name)?,
        };

        debug!(
            "Serialized '{}' to {:?} ({} bytes)",
            original_file_name,
            format,
            bytes.len()
        );

        Ok(ExportArtifact {
            bytes,
            file_name,
            mime_type: format.mime_type(),
        })
    }
}

/// Replace the extension of the original file name.
fn output_file_name(original: &str, extension: &str) -> String {
    let stem = Path::new(original)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(original);
    format!("{}.{}", stem, extension)
}

/// Write the table as comma-delimited CSV with a header row and no index
/// column.
fn write_csv(table: &Table, file_name: &str) -> Result<Vec<u8>> {
    let mut df = table.dataframe().clone();
    let mut buffer = Vec::new();

    CsvWriter::new(&mut buffer)
        .include_header(true)
        .finish(&mut df)
        .map_err(|e| SweeperError::Serialization {
            file_name: file_name.to_string(),
            reason: e.to_string(),
        })?;

    Ok(buffer)
}
