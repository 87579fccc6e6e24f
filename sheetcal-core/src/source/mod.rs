//! Readers that turn input files into a [`Dataset`].
//!
//! The reader is picked from the file extension. Everything downstream only
//! sees `Dataset`, so the normalizer never knows which format it came from.

mod delimited;
mod spreadsheet;

use std::path::Path;

use crate::dataset::Dataset;
use crate::error::SourceError;

pub use delimited::read_delimited;

/// Load the first table of `path`, or the named worksheet for workbooks.
pub fn load(path: &Path, sheet: Option<&str>) -> Result<Dataset, SourceError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let dataset = match extension.as_deref() {
        Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => spreadsheet::read(path, sheet)?,
        Some("csv") => delimited::read_path(path, b',')?,
        Some("tsv") => delimited::read_path(path, b'\t')?,
        _ => return Err(SourceError::UnsupportedFormat(path.to_path_buf())),
    };

    tracing::debug!(
        path = %path.display(),
        columns = dataset.headers.len(),
        rows = dataset.len(),
        "Loaded dataset"
    );

    Ok(dataset)
}
