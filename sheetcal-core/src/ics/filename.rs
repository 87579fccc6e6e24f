//! Filesystem-safe names for generated documents.

/// Longest title stem kept in a filename.
const MAX_STEM_LEN: usize = 64;

/// Stem used when nothing of the title survives sanitizing.
const FALLBACK_STEM: &str = "event";

/// `<sanitized-title>-<row>.ics`. The row index keeps rows that share a
/// title from overwriting each other.
pub fn event_filename(title: &str, row: usize) -> String {
    format!("{}-{}.ics", sanitize_title(title), row)
}

/// Collapse every run of characters outside `[A-Za-z0-9_-]` into one `_`,
/// trim leading/trailing `_` and cap the length.
pub fn sanitize_title(title: &str) -> String {
    let mut stem = String::with_capacity(title.len());
    let mut pending_underscore = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            if pending_underscore && !stem.is_empty() {
                stem.push('_');
            }
            pending_underscore = false;
            stem.push(c);
        } else {
            pending_underscore = true;
        }
    }

    stem.truncate(MAX_STEM_LEN);
    let stem = stem.trim_matches('_');

    if stem.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        stem.to_string()
    }
}
