//! Colored terminal rendering for conversion results.

use owo_colors::OwoColorize;
use sheetcal_core::{ConvertReport, Outcome, RowFailure, WrittenEvent};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for WrittenEvent {
    fn render(&self) -> String {
        format!(
            "   {} {} {}",
            "+".green(),
            self.title.green(),
            self.path.display().to_string().dimmed()
        )
    }
}

impl Render for RowFailure {
    fn render(&self) -> String {
        format!(
            "   {} {} {}",
            "!".red(),
            format!("row {}:", self.row).red(),
            self.cause
        )
    }
}

impl Render for ConvertReport {
    fn render(&self) -> String {
        let written = format!("{} {}", self.written.len(), pluralize("event", self.written.len()));
        let skipped = format!("{} skipped", self.skipped.len());

        match self.outcome() {
            Outcome::Complete => format!("{} written", written).green().to_string(),
            Outcome::Partial => format!("{} written, {}", written, skipped).yellow().to_string(),
            Outcome::Failed => format!("{} written, {}", written, skipped).red().to_string(),
        }
    }
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetcal_core::RowError;
    use std::path::PathBuf;

    #[test]
    fn pluralize_counts() {
        assert_eq!(pluralize("event", 1), "event");
        assert_eq!(pluralize("event", 0), "events");
        assert_eq!(pluralize("event", 3), "events");
    }

    #[test]
    fn failure_names_row_and_cause() {
        let failure = RowFailure {
            row: 4,
            cause: RowError::EmptyTitle,
        };
        let line = failure.render();
        assert!(line.contains("row 4:"));
        assert!(line.contains("Title is empty"));
    }

    #[test]
    fn summary_mentions_skips() {
        let report = ConvertReport {
            written: vec![WrittenEvent {
                row: 1,
                title: "Sync".into(),
                path: PathBuf::from("out/Sync-1.ics"),
            }],
            skipped: vec![RowFailure {
                row: 2,
                cause: RowError::DateParse("soon".into()),
            }],
        };
        let summary = report.render();
        assert!(summary.contains("1 event written"));
        assert!(summary.contains("1 skipped"));
    }
}
