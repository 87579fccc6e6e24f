//! Core library for sheetcal.
//!
//! Turns rows of a spreadsheet into one `.ics` document each:
//! - `source` reads xlsx/ods/csv files into a [`Dataset`]
//! - `normalize` validates a row into a [`NormalizedEvent`]
//! - `ics` renders the event with Apple travel-time metadata and an alarm
//! - `convert` drives the rows through an [`EventSink`]

pub mod cell;
pub mod convert;
pub mod dataset;
pub mod error;
pub mod event;
pub mod ics;
pub mod normalize;
pub mod options;
pub mod output;
pub mod source;

pub use cell::CellValue;
pub use convert::{ConvertReport, Outcome, RowFailure, WrittenEvent, convert};
pub use dataset::{Dataset, Row};
pub use error::{DatasetError, DatasetResult, RowError, SourceError};
pub use event::{NormalizedEvent, RawFields};
pub use ics::EventDocument;
pub use options::ConvertOptions;
pub use output::{DirectorySink, EventSink, MemorySink};
