//! CSV / TSV input. Every cell arrives as text.

use std::io::Read;
use std::path::Path;

use crate::cell::CellValue;
use crate::dataset::Dataset;
use crate::error::SourceError;

pub(super) fn read_path(path: &Path, delimiter: u8) -> Result<Dataset, SourceError> {
    let file = std::fs::File::open(path).map_err(|e| SourceError::Open {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    read_delimited(file, delimiter)
}

/// Read a delimited table whose first record is the header.
pub fn read_delimited<R: Read>(input: R, delimiter: u8) -> Result<Dataset, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(SourceError::NoHeader);
    }

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        records.push(record.iter().map(CellValue::text).collect());
    }

    Ok(Dataset::new(headers.iter(), records))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_quoted_fields() {
        let input = "Title,Date,Time,Venue\n\"Lunch, team\",2024-03-04,12:00 - 13:00,\"Cafe \"\"Blue\"\"\"\n";
        let ds = read_delimited(input.as_bytes(), b',').unwrap();

        assert_eq!(ds.rows[0].cell(0), &CellValue::text("Lunch, team"));
        assert_eq!(ds.rows[0].cell(3), &CellValue::text("Cafe \"Blue\""));
    }

    #[test]
    fn tab_delimiter() {
        let input = "Title\tDate\nA\t2024-01-01\n";
        let ds = read_delimited(input.as_bytes(), b'\t').unwrap();
        assert_eq!(ds.headers, vec!["Title", "Date"]);
        assert_eq!(ds.rows[0].cell(1), &CellValue::text("2024-01-01"));
    }

    #[test]
    fn blank_cells_are_empty() {
        let input = "Title,Venue\nA,\n";
        let ds = read_delimited(input.as_bytes(), b',').unwrap();
        assert_eq!(ds.rows[0].cell(1), &CellValue::Empty);
    }

    #[test]
    fn empty_input_has_no_header() {
        let err = read_delimited("".as_bytes(), b',').unwrap_err();
        assert!(matches!(err, SourceError::NoHeader));
    }
}
