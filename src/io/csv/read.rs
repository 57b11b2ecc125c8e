//! CSV reading operations.

use std::{collections::BTreeMap, io::Cursor, path::Path};

use anyhow::{Context, Result};
use polars::{frame::DataFrame, io::SerReader, prelude::CsvReadOptions};

/// One row of a tabular source: column name -> raw cell text.
/// Null cells are left out of the row.
pub type Row = BTreeMap<String, String>;

/// Reads a CSV file from `path` into rows.
pub(crate) fn read_csv_rows(path: &Path) -> Result<Vec<Row>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("[io::csv::read] Failed to open CSV file: {}", path.display()))?;
    read_csv_rows_bytes(&bytes)
        .with_context(|| format!("[io::csv::read] Failed to read CSV from {:?}", path))
}

/// Reads CSV bytes into rows. Every column is read as a string.
pub(crate) fn read_csv_rows_bytes(bytes: &[u8]) -> Result<Vec<Row>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let df = read_csv_bytes(bytes)?;
    dataframe_to_rows(&df)
}

/// Read DataFrame from CSV bytes without schema inference, so ids keep their
/// leading zeros and geometry payloads stay untouched.
pub(crate) fn read_csv_bytes(bytes: &[u8]) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .context("[io::csv::read] Failed to read CSV from bytes")
}

/// Convert a string-typed DataFrame into rows, column by column.
pub(crate) fn dataframe_to_rows(df: &DataFrame) -> Result<Vec<Row>> {
    let mut rows = vec![Row::new(); df.height()];
    for col in df.get_columns() {
        let name = col.name().to_string();
        let values = col.str()
            .with_context(|| format!("[io::csv::read] Column {name} is not a string column"))?;
        for (row, value) in rows.iter_mut().zip(values.into_iter()) {
            if let Some(value) = value {
                row.insert(name.clone(), value.to_string());
            }
        }
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_every_column_as_text() {
        let csv = "id,District_Code,shapes\n001,007,\"{'type': 'Polygon'}\"\n002,,x\n";
        let rows = read_csv_rows_bytes(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["id"], "001");
        assert_eq!(rows[0]["District_Code"], "007");
        assert_eq!(rows[0]["shapes"], "{'type': 'Polygon'}");
        assert!(!rows[1].contains_key("District_Code"));
    }

    #[test]
    fn blank_input_has_no_rows() {
        assert!(read_csv_rows_bytes(b"").unwrap().is_empty());
        assert!(read_csv_rows_bytes(b"  \n").unwrap().is_empty());
    }

    #[test]
    fn header_only_input_has_no_rows() {
        assert!(read_csv_rows_bytes(b"id,shapes\n").unwrap().is_empty());
    }
}
