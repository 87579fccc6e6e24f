//! Date cell parsing.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::cell::CellValue;
use crate::error::RowError;

/// Date-only text formats, tried in order.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", // 2024-03-04
    "%m/%d/%Y", // 03/04/2024
    "%B %d, %Y", // March 4, 2024
    "%b %d, %Y", // Mar 4, 2024
    "%d %B %Y", // 4 March 2024
    "%Y/%m/%d", // 2024/03/04
];

/// Datetime text formats whose date part is used, tried after `DATE_FORMATS`.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parse a date cell. Native dates are used as-is; numbers are read as
/// spreadsheet serials; text goes through the format chain.
pub fn parse_date(cell: &CellValue) -> Result<NaiveDate, RowError> {
    match cell {
        CellValue::Date(d) => Ok(*d),
        CellValue::DateTime(dt) => Ok(dt.date()),
        CellValue::Number(serial) => {
            from_serial(*serial).ok_or_else(|| RowError::DateParse(cell.to_string()))
        }
        CellValue::Text(s) => parse_date_text(s),
        other => Err(RowError::DateParse(other.to_string())),
    }
}

fn parse_date_text(input: &str) -> Result<NaiveDate, RowError> {
    let s = input.trim();

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
        .ok_or_else(|| RowError::DateParse(input.to_string()))
}

/// Spreadsheet day serial (1900 date system, epoch 1899-12-30).
fn from_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 || serial > 2_958_465.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}
