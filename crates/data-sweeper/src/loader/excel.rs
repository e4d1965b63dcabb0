//! XLSX parsing via calamine.
//!
//! Reads the first worksheet, treating the first row as the header. A
//! column becomes numeric when every non-empty cell carries a native
//! number; everything else is held as text. Empty and error cells map
//! to nulls.

use crate::error::{Result, SweeperError};
use calamine::{Data, Reader, Xlsx};
use polars::prelude::*;
use std::io::Cursor;

/// Read XLSX bytes into a DataFrame.
pub(crate) fn read_xlsx(bytes: &[u8], file_name: &str) -> Result<DataFrame> {
    let mut workbook: Xlsx<_> =
        Xlsx::new(Cursor::new(bytes.to_vec())).map_err(|e| parse_error(file_name, e))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| parse_error(file_name, "workbook contains no worksheets"))?
        .map_err(|e| parse_error(file_name, e))?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Err(parse_error(file_name, "worksheet is empty"));
    };

    let mut headers = Vec::with_capacity(header_row.len());
    for (idx, cell) in header_row.iter().enumerate() {
        match cell {
            Data::Empty => {
                return Err(parse_error(
                    file_name,
                    format!("empty header cell at column {}", idx + 1),
                ));
            }
            other => headers.push(other.to_string()),
        }
    }

    let data_rows: Vec<&[Data]> = rows.collect();
    let mut columns = Vec::with_capacity(headers.len());
    for (col_idx, name) in headers.iter().enumerate() {
        columns.push(build_column(name, col_idx, &data_rows));
    }

    DataFrame::new(columns).map_err(|e| parse_error(file_name, e))
}

fn parse_error(file_name: &str, reason: impl ToString) -> SweeperError {
    SweeperError::Parse {
        file_name: file_name.to_string(),
        reason: reason.to_string(),
    }
}

/// Assemble one column from the worksheet grid, inferring numeric vs. text
/// from the native cell types.
fn build_column(name: &str, col_idx: usize, rows: &[&[Data]]) -> Column {
    let empty = Data::Empty;
    let cells: Vec<&Data> = rows
        .iter()
        .map(|row| row.get(col_idx).unwrap_or(&empty))
        .collect();

    let mut numeric = true;
    let mut saw_number = false;
    for cell in &cells {
        match cell {
            Data::Empty | Data::Error(_) => {}
            Data::Int(_) | Data::Float(_) => saw_number = true,
            _ => {
                numeric = false;
                break;
            }
        }
    }

    if numeric && saw_number {
        let values: Vec<Option<f64>> = cells
            .iter()
            .map(|cell| match cell {
                Data::Int(v) => Some(*v as f64),
                Data::Float(v) => Some(*v),
                _ => None,
            })
            .collect();
        Column::new(name.into(), values)
    } else {
        let values: Vec<Option<String>> = cells
            .iter()
            .map(|cell| match cell {
                Data::Empty | Data::Error(_) => None,
                other => Some(other.to_string()),
            })
            .collect();
        Column::new(name.into(), values)
    }
}
