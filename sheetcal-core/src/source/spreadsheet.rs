//! Workbook input (xlsx, xls, ods, ...) via calamine.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::cell::CellValue;
use crate::dataset::Dataset;
use crate::error::SourceError;

pub(super) fn read(path: &Path, sheet: Option<&str>) -> Result<Dataset, SourceError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| SourceError::Open {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let names = workbook.sheet_names();
    let name = match sheet {
        Some(wanted) => names
            .iter()
            .find(|n| n.as_str() == wanted)
            .cloned()
            .ok_or_else(|| SourceError::SheetNotFound(wanted.to_string()))?,
        None => names.first().cloned().ok_or(SourceError::NoSheets)?,
    };

    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| SourceError::Open {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut rows = range.rows();
    let header = rows.next().ok_or(SourceError::NoHeader)?;
    let headers: Vec<String> = header.iter().map(|c| to_cell(c).to_string()).collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(SourceError::NoHeader);
    }

    let records = rows.map(|row| row.iter().map(to_cell).collect::<Vec<_>>());

    Ok(Dataset::new(headers, records))
}

/// Convert a calamine cell, keeping native date/time values typed.
fn to_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::text(s.as_str()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Error(e) => CellValue::Text(format!("#ERR:{e:?}")),
        Data::DateTime(dt) => {
            if dt.is_duration() {
                return match dt.as_duration() {
                    Some(d) if d >= TimeDelta::zero() && d < TimeDelta::days(1) => {
                        CellValue::Time(NaiveTime::MIN + d)
                    }
                    _ => CellValue::Number(dt.as_f64()),
                };
            }
            match dt.as_datetime() {
                // Serials below one day carry a time of day only.
                Some(value) if dt.as_f64() < 1.0 => CellValue::Time(value.time()),
                Some(value) => classify(value),
                None => CellValue::Number(dt.as_f64()),
            }
        }
        Data::DateTimeIso(s) => parse_iso(s).unwrap_or_else(|| CellValue::text(s.as_str())),
        Data::DurationIso(s) => CellValue::text(s.as_str()),
    }
}

fn classify(value: NaiveDateTime) -> CellValue {
    if value.time() == NaiveTime::MIN {
        CellValue::Date(value.date())
    } else {
        CellValue::DateTime(value)
    }
}

fn parse_iso(s: &str) -> Option<CellValue> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(classify(dt));
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(CellValue::Date(d));
    }
    NaiveTime::parse_from_str(s, "%H:%M:%S%.f")
        .ok()
        .map(CellValue::Time)
}
