//! File ingestion: format detection and parsing into a [`Table`].
//!
//! Format is decided by file-name extension alone (case-insensitive).
//! CSV parsing goes through Polars with its native schema inference;
//! XLSX parsing goes through calamine with the cell types the workbook
//! already carries. No schema validation happens beyond that.

mod csv;
mod excel;

use crate::error::{Result, SweeperError};
use crate::types::Table;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileFormat {
    Csv,
    Xlsx,
}

impl FileFormat {
    /// Detect the format from a file name.
    ///
    /// Extensions are matched case-insensitively. Anything other than
    /// `.csv` / `.xlsx` fails with [`SweeperError::UnsupportedFormat`]
    /// so the caller can skip the file and keep processing others.
    pub fn from_file_name(file_name: &str) -> Result<Self> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("xlsx") => Ok(Self::Xlsx),
            _ => Err(SweeperError::UnsupportedFormat {
                file_name: file_name.to_string(),
            }),
        }
    }
}

/// Parses raw upload bytes into a [`Table`].
#[derive(Debug, Clone)]
pub struct TableLoader {
    infer_schema_length: Option<usize>,
}

impl Default for TableLoader {
    fn default() -> Self {
        Self::new(Some(100))
    }
}

impl TableLoader {
    /// Create a loader with the given CSV schema-inference window.
    pub fn new(infer_schema_length: Option<usize>) -> Self {
        Self {
            infer_schema_length,
        }
    }

    /// Parse raw file content into a table.
    ///
    /// # Errors
    ///
    /// - [`SweeperError::UnsupportedFormat`] for unrecognized extensions
    /// - [`SweeperError::Parse`] for content malformed in the detected format
    /// - [`SweeperError::EmptyTable`] when parsing yields no columns
    pub fn load(&self, bytes: &[u8], file_name: &str) -> Result<Table> {
        let format = FileFormat::from_file_name(file_name)?;
        debug!("Detected {:?} format for '{}'", format, file_name);

        let df = match format {
            FileFormat::Csv => csv::read_csv(bytes, file_name, self.infer_schema_length)?,
            FileFormat::Xlsx => excel::read_xlsx(bytes, file_name)?,
        };

        if df.width() == 0 {
            return Err(SweeperError::EmptyTable {
                file_name: file_name.to_string(),
            });
        }

        debug!(
            "Loaded '{}': {} rows x {} columns",
            file_name,
            df.height(),
            df.width()
        );

        Table::from_dataframe(df)
    }
}
