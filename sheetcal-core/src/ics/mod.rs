//! ICS document generation for normalized events.
//!
//! One event per document, with the Apple travel-time properties and a
//! single display alarm.

mod filename;
mod generate;

pub use filename::{event_filename, sanitize_title};
pub use generate::{render_document, render_notes};

use chrono::{DateTime, Utc};

use crate::event::NormalizedEvent;
use crate::options::ConvertOptions;

/// A rendered `.ics` file and the name it should be written under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDocument {
    pub filename: String,
    pub contents: String,
}

impl EventDocument {
    /// Render `event` with `created` as its DTSTAMP/CREATED time.
    pub fn render(
        event: &NormalizedEvent,
        options: &ConvertOptions,
        created: DateTime<Utc>,
    ) -> Self {
        EventDocument {
            filename: event_filename(&event.title, event.row),
            contents: render_document(event, options, created),
        }
    }
}
