//! CSV parsing via Polars.

use crate::error::{Result, SweeperError};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::io::Cursor;

/// Read CSV bytes into a DataFrame using Polars schema inference
/// (numbers become numeric columns, everything else stays text).
pub(crate) fn read_csv(
    bytes: &[u8],
    file_name: &str,
    infer_schema_length: Option<usize>,
) -> Result<DataFrame> {
    let cursor = Cursor::new(bytes.to_vec());

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(infer_schema_length)
        .into_reader_with_file_handle(cursor)
        .finish()
        .map_err(|e| SweeperError::Parse {
            file_name: file_name.to_string(),
            reason: e.to_string(),
        })
}
