//! Single-sheet XLSX writer.
//!
//! Assembles the Office Open XML package parts directly with ZIP/XML
//! generation: content types, package relationships, workbook, and one
//! worksheet. Text cells use inline strings so no shared-string table is
//! needed; numbers are written as plain `<v>` values.

use crate::error::{Result, SweeperError};
use polars::prelude::*;
use std::io::{Cursor, Write};
use ::zip::ZipWriter;
use ::zip::write::FileOptions;

const XML_DECL: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n";

const CONTENT_TYPES_XML: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n",
    "<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">",
    "<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>",
    "<Default Extension=\"xml\" ContentType=\"application/xml\"/>",
    "<Override PartName=\"/xl/workbook.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml\"/>",
    "<Override PartName=\"/xl/worksheets/sheet1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml\"/>",
    "</Types>"
);

const ROOT_RELS_XML: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n",
    "<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
    "<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"xl/workbook.xml\"/>",
    "</Relationships>"
);

const WORKBOOK_XML: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n",
    "<workbook xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\" ",
    "xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\">",
    "<sheets><sheet name=\"Sheet1\" sheetId=\"1\" r:id=\"rId1\"/></sheets>",
    "</workbook>"
);

const WORKBOOK_RELS_XML: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n",
    "<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
    "<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet\" Target=\"worksheets/sheet1.xml\"/>",
    "</Relationships>"
);

/// Serialize a DataFrame into a complete XLSX package.
pub(crate) fn write_workbook(df: &DataFrame, file_name: &str) -> Result<Vec<u8>> {
    let sheet_xml = worksheet_xml(df, file_name)?;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default();

    let parts: [(&str, &str); 5] = [
        ("[Content_Types].xml", CONTENT_TYPES_XML),
        ("_rels/.rels", ROOT_RELS_XML),
        ("xl/workbook.xml", WORKBOOK_XML),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS_XML),
        ("xl/worksheets/sheet1.xml", &sheet_xml),
    ];

    for (path, content) in parts {
        zip.start_file(path, options)
            .map_err(|e| ser_error(file_name, e))?;
        zip.write_all(content.as_bytes())
            .map_err(|e| ser_error(file_name, e))?;
    }

    let cursor = zip.finish().map_err(|e| ser_error(file_name, e))?;
    Ok(cursor.into_inner())
}

fn ser_error(file_name: &str, reason: impl ToString) -> SweeperError {
    SweeperError::Serialization {
        file_name: file_name.to_string(),
        reason: reason.to_string(),
    }
}

/// Cell content as it lands in the worksheet XML.
enum Cell {
    Empty,
    Number(String),
    Text(String),
}

fn worksheet_xml(df: &DataFrame, file_name: &str) -> Result<String> {
    let mut xml = String::new();
    xml.push_str(XML_DECL);
    xml.push_str(
        "<worksheet xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\">",
    );
    xml.push_str("<sheetData>");

    // Header row
    xml.push_str("<row r=\"1\">");
    for (col_idx, name) in df.get_column_names().iter().enumerate() {
        xml.push_str(&inline_string_cell(
            &cell_ref(col_idx, 1),
            name.as_str(),
            file_name,
        )?);
    }
    xml.push_str("</row>");

    // Data rows
    let columns = df.get_columns();
    for row_idx in 0..df.height() {
        let row_num = row_idx + 2;
        xml.push_str(&format!("<row r=\"{}\">", row_num));
        for (col_idx, column) in columns.iter().enumerate() {
            let value = column.get(row_idx)?;
            match cell_value(&value) {
                Cell::Empty => {}
                Cell::Number(literal) => {
                    xml.push_str(&format!(
                        "<c r=\"{}\"><v>{}</v></c>",
                        cell_ref(col_idx, row_num),
                        literal
                    ));
                }
                Cell::Text(text) => {
                    xml.push_str(&inline_string_cell(
                        &cell_ref(col_idx, row_num),
                        &text,
                        file_name,
                    )?);
                }
            }
        }
        xml.push_str("</row>");
    }

    xml.push_str("</sheetData></worksheet>");
    Ok(xml)
}

/// Map an AnyValue to its worksheet representation.
///
/// Non-finite floats have no `<v>` encoding and become empty cells.
fn cell_value(value: &AnyValue) -> Cell {
    match value {
        AnyValue::Null => Cell::Empty,
        AnyValue::String(s) => Cell::Text((*s).to_string()),
        AnyValue::StringOwned(s) => Cell::Text(s.to_string()),
        AnyValue::Float64(v) if !v.is_finite() => Cell::Empty,
        AnyValue::Float32(v) if !v.is_finite() => Cell::Empty,
        AnyValue::Float64(v) => Cell::Number(format!("{}", v)),
        AnyValue::Float32(v) => Cell::Number(format!("{}", v)),
        AnyValue::Int8(v) => Cell::Number(v.to_string()),
        AnyValue::Int16(v) => Cell::Number(v.to_string()),
        AnyValue::Int32(v) => Cell::Number(v.to_string()),
        AnyValue::Int64(v) => Cell::Number(v.to_string()),
        AnyValue::UInt8(v) => Cell::Number(v.to_string()),
        AnyValue::UInt16(v) => Cell::Number(v.to_string()),
        AnyValue::UInt32(v) => Cell::Number(v.to_string()),
        AnyValue::UInt64(v) => Cell::Number(v.to_string()),
        AnyValue::Boolean(v) => Cell::Text(v.to_string()),
        other => Cell::Text(format!("{}", other)),
    }
}

fn inline_string_cell(cell_ref: &str, text: &str, file_name: &str) -> Result<String> {
    let escaped = escape_xml(text, file_name)?;
    Ok(format!(
        "<c r=\"{}\" t=\"inlineStr\"><is><t xml:space=\"preserve\">{}</t></is></c>",
        cell_ref, escaped
    ))
}

/// Escape text for an XML text node.
///
/// Control characters below U+0020 (other than tab/newline/carriage
/// return) are illegal in XML 1.0 and cannot be represented at all, so
/// they fail the export.
fn escape_xml(text: &str, file_name: &str) -> Result<String> {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\t' | '\n' | '\r' => out.push(ch),
            c if (c as u32) < 0x20 => {
                return Err(ser_error(
                    file_name,
                    format!(
                        "control character U+{:04X} cannot be encoded in a worksheet",
                        c as u32
                    ),
                ));
            }
            c => out.push(c),
        }
    }
    Ok(out)
}

/// A1-style cell reference for a zero-based column index and one-based row.
fn cell_ref(col: usize, row: usize) -> String {
    let mut letters = String::new();
    let mut n = col + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.insert(0, (b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    format!("{}{}", letters, row)
}
