//! The normalized form of one spreadsheet row.

use chrono::DateTime;
use chrono_tz::Tz;

/// Original header names and their stringified cell values, in column order.
///
/// Kept as a list of pairs so the notes body always follows the source
/// column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFields(Vec<(String, String)>);

impl RawFields {
    pub fn new() -> Self {
        RawFields(Vec::new())
    }

    pub fn push(&mut self, header: impl Into<String>, value: impl Into<String>) {
        self.0.push((header.into(), value.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn get(&self, header: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == header).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        RawFields(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// A validated event ready for rendering.
///
/// `end` is always strictly after `start`, both in the configured zone, and
/// `title` is trimmed and non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedEvent {
    /// 1-based source row index, used for filenames and error reports.
    pub row: usize,
    pub title: String,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub venue: String,
    pub raw_fields: RawFields,
}
