//! The row-processing pipeline: normalize, render, write.

use std::path::PathBuf;

use chrono::Utc;

use crate::dataset::{Dataset, Row};
use crate::error::{DatasetResult, RowError};
use crate::ics::EventDocument;
use crate::normalize::Normalizer;
use crate::options::ConvertOptions;
use crate::output::EventSink;

/// A row that was skipped, and why.
#[derive(Debug)]
pub struct RowFailure {
    pub row: usize,
    pub cause: RowError,
}

/// A row that made it to the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenEvent {
    pub row: usize,
    pub title: String,
    pub path: PathBuf,
}

/// How a run ended overall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every row was written.
    Complete,
    /// Some rows were written, some skipped.
    Partial,
    /// Nothing was written.
    Failed,
}

#[derive(Debug, Default)]
pub struct ConvertReport {
    pub written: Vec<WrittenEvent>,
    pub skipped: Vec<RowFailure>,
}

impl ConvertReport {
    pub fn outcome(&self) -> Outcome {
        match (self.written.is_empty(), self.skipped.is_empty()) {
            (true, _) => Outcome::Failed,
            (false, true) => Outcome::Complete,
            (false, false) => Outcome::Partial,
        }
    }

    pub fn total(&self) -> usize {
        self.written.len() + self.skipped.len()
    }
}

/// Convert every row of `dataset`.
///
/// Missing required columns abort before any row is processed. Row-level
/// failures, including failed writes, are collected in the report and the
/// remaining rows still run.
pub fn convert(
    dataset: &Dataset,
    options: &ConvertOptions,
    sink: &mut dyn EventSink,
) -> DatasetResult<ConvertReport> {
    let normalizer = Normalizer::new(&dataset.headers, options.timezone)?;

    tracing::info!(
        rows = dataset.len(),
        timezone = options.timezone.name(),
        alert_minutes = options.alert_minutes,
        "Converting rows"
    );

    let mut report = ConvertReport::default();

    for row in &dataset.rows {
        match convert_row(&normalizer, row, options, sink) {
            Ok(written) => {
                tracing::debug!(row = written.row, path = %written.path.display(), "Wrote event");
                report.written.push(written);
            }
            Err(cause) => {
                tracing::warn!(row = row.index, error = %cause, "Skipping row");
                report.skipped.push(RowFailure {
                    row: row.index,
                    cause,
                });
            }
        }
    }

    tracing::info!(
        written = report.written.len(),
        skipped = report.skipped.len(),
        "Conversion finished"
    );

    Ok(report)
}

fn convert_row(
    normalizer: &Normalizer<'_>,
    row: &Row,
    options: &ConvertOptions,
    sink: &mut dyn EventSink,
) -> Result<WrittenEvent, RowError> {
    let event = normalizer.normalize(row)?;
    let document = EventDocument::render(&event, options, Utc::now());

    let path = sink
        .write(&document.filename, &document.contents)
        .map_err(|source| RowError::Write {
            filename: document.filename.clone(),
            source,
        })?;

    Ok(WrittenEvent {
        row: event.row,
        title: event.title,
        path,
    })
}
