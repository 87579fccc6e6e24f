//! Error types for sheetcal.
//!
//! Failures come in two categories. A [`DatasetError`] aborts the whole run
//! because every remaining row would fail the same way. A [`RowError`] only
//! affects the row it came from; the pipeline records it and moves on.

use std::path::PathBuf;

use thiserror::Error;

/// Run-aborting failures.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Unknown timezone '{0}'. Expected an IANA name such as \"Europe/Berlin\"")]
    UnknownTimezone(String),

    #[error("{field} must be a non-negative number of minutes, got {value}")]
    NegativeMinutes { field: &'static str, value: i64 },

    #[error("Could not create output directory {path}: {source}")]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Failures while reading the tabular input.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Unsupported input file type: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("Could not open {path}: {message}")]
    Open { path: PathBuf, message: String },

    #[error("Sheet '{0}' not found in workbook")]
    SheetNotFound(String),

    #[error("Workbook has no sheets")]
    NoSheets,

    #[error("Input has no header row")]
    NoHeader,

    #[error("Could not read delimited input: {0}")]
    Delimited(#[from] csv::Error),
}

/// Row-scoped failures. The row is skipped and the run continues.
#[derive(Error, Debug)]
pub enum RowError {
    #[error("Could not parse date '{0}'")]
    DateParse(String),

    #[error("Could not parse time range '{value}': {reason}")]
    TimeParse { value: String, reason: String },

    #[error("End time {end} is not after start time {start}")]
    TimeRange { start: String, end: String },

    #[error("Local time {0} does not exist in the configured timezone")]
    NonexistentLocalTime(String),

    #[error("Title is empty")]
    EmptyTitle,

    #[error("Could not write {filename}: {source}")]
    Write {
        filename: String,
        #[source]
        source: std::io::Error,
    },
}

impl RowError {
    pub(crate) fn time_parse(value: impl Into<String>, reason: impl Into<String>) -> Self {
        RowError::TimeParse {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for run-level operations.
pub type DatasetResult<T> = Result<T, DatasetError>;
