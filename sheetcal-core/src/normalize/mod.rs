//! Row normalization: raw spreadsheet rows into [`NormalizedEvent`]s.

mod date;
mod time;

use chrono::{DateTime, LocalResult, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;

use crate::cell::CellValue;
use crate::dataset::Row;
use crate::error::{DatasetError, RowError};
use crate::event::{NormalizedEvent, RawFields};

pub use date::parse_date;
pub use time::{parse_time, parse_time_range};

/// Column positions of the four required fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub title: usize,
    pub date: usize,
    pub time: usize,
    pub venue: usize,
}

impl ColumnMap {
    /// Find `title`, `date`, `time` and `venue` among `headers`, ignoring
    /// case and surrounding whitespace. The first match for each name wins.
    pub fn resolve<S: AsRef<str>>(headers: &[S]) -> Result<Self, DatasetError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.as_ref().trim().eq_ignore_ascii_case(name))
        };

        let title = find("title");
        let date = find("date");
        let time = find("time");
        let venue = find("venue");

        match (title, date, time, venue) {
            (Some(title), Some(date), Some(time), Some(venue)) => Ok(ColumnMap {
                title,
                date,
                time,
                venue,
            }),
            _ => {
                let missing = [
                    ("title", title),
                    ("date", date),
                    ("time", time),
                    ("venue", venue),
                ]
                .into_iter()
                .filter(|(_, pos)| pos.is_none())
                .map(|(name, _)| name.to_string())
                .collect();
                Err(DatasetError::MissingColumns(missing))
            }
        }
    }
}

/// Turns rows of one dataset into events in a fixed timezone.
#[derive(Debug, Clone)]
pub struct Normalizer<'a> {
    headers: &'a [String],
    columns: ColumnMap,
    timezone: Tz,
}

impl<'a> Normalizer<'a> {
    /// Resolve the required columns once for the whole dataset.
    pub fn new(headers: &'a [String], timezone: Tz) -> Result<Self, DatasetError> {
        let columns = ColumnMap::resolve(headers)?;
        Ok(Normalizer {
            headers,
            columns,
            timezone,
        })
    }

    pub fn normalize(&self, row: &Row) -> Result<NormalizedEvent, RowError> {
        let title = row.cell(self.columns.title).to_string().trim().to_string();
        if title.is_empty() {
            return Err(RowError::EmptyTitle);
        }

        let date = parse_date(row.cell(self.columns.date))?;
        let (start_time, end_time) = parse_time_range(row.cell(self.columns.time))?;
        let (start, end) = combine(date, start_time, end_time, self.timezone)?;

        let venue = row.cell(self.columns.venue).to_string().trim().to_string();

        Ok(NormalizedEvent {
            row: row.index,
            title,
            start,
            end,
            venue,
            raw_fields: raw_fields(self.headers, &row.cells),
        })
    }
}

/// Attach `timezone` to `date` at both times. The end must come strictly
/// after the start.
pub fn combine(
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
    timezone: Tz,
) -> Result<(DateTime<Tz>, DateTime<Tz>), RowError> {
    let start = localize(date, start, timezone)?;
    let end = localize(date, end, timezone)?;

    if end <= start {
        return Err(RowError::TimeRange {
            start: start.format("%H:%M").to_string(),
            end: end.format("%H:%M").to_string(),
        });
    }

    Ok((start, end))
}

fn localize(date: NaiveDate, time: NaiveTime, timezone: Tz) -> Result<DateTime<Tz>, RowError> {
    let naive = date.and_time(time);
    match timezone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt),
        // DST fold: the wall-clock time happens twice, take the first.
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => Err(RowError::NonexistentLocalTime(
            naive.format("%Y-%m-%d %H:%M").to_string(),
        )),
    }
}

/// Every column of the row, in header order, as display text.
fn raw_fields(headers: &[String], cells: &[CellValue]) -> RawFields {
    headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let value = cells.get(i).map(ToString::to_string).unwrap_or_default();
            (header.clone(), value)
        })
        .collect()
}
