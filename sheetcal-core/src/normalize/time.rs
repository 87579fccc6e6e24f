//! Time range parsing ("9:00 AM - 10:30 AM").

use chrono::NaiveTime;

use crate::cell::CellValue;
use crate::error::RowError;

/// Time-of-day formats, tried in order on upper-cased input.
const TIME_FORMATS: &[&str] = &["%I:%M %p", "%I:%M%p", "%I:%M:%S %p", "%H:%M", "%H:%M:%S"];

/// Split a time cell into start and end times of day.
///
/// Text is split on the first hyphen only, so anything after a second hyphen
/// belongs to the end side and must still parse as a time.
pub fn parse_time_range(cell: &CellValue) -> Result<(NaiveTime, NaiveTime), RowError> {
    let text = match cell {
        CellValue::TimeRange(start, end) => return Ok((*start, *end)),
        CellValue::Text(s) => s,
        other => {
            return Err(RowError::time_parse(
                other.to_string(),
                "expected a start and end time separated by a hyphen",
            ));
        }
    };

    let Some((start, end)) = text.split_once('-') else {
        return Err(RowError::time_parse(
            text.as_str(),
            "expected a start and end time separated by a hyphen",
        ));
    };

    let (start, end) = (start.trim(), end.trim());
    if start.is_empty() || end.is_empty() {
        return Err(RowError::time_parse(
            text.as_str(),
            "both sides of the hyphen need a time",
        ));
    }

    let start = parse_time(start).ok_or_else(|| {
        RowError::time_parse(text.as_str(), format!("unrecognized start time '{start}'"))
    })?;
    let end = parse_time(end).ok_or_else(|| {
        RowError::time_parse(text.as_str(), format!("unrecognized end time '{end}'"))
    })?;

    Ok((start, end))
}

/// Parse a single time of day.
pub fn parse_time(input: &str) -> Option<NaiveTime> {
    let upper = expand_bare_hour(&input.trim().to_uppercase());

    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(&upper, fmt).ok())
}

/// "9 AM" / "9AM" -> "9:00 AM". Other input is returned unchanged.
fn expand_bare_hour(input: &str) -> String {
    for meridiem in ["AM", "PM"] {
        if let Some(hour) = input.strip_suffix(meridiem) {
            let hour = hour.trim_end();
            if !hour.is_empty() && hour.len() <= 2 && hour.chars().all(|c| c.is_ascii_digit()) {
                return format!("{hour}:00 {meridiem}");
            }
        }
    }
    input.to_string()
}
