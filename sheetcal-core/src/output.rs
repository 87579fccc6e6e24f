//! Where rendered documents go.

use std::io;
use std::path::PathBuf;

use crate::error::{DatasetError, DatasetResult};

/// Destination for rendered documents, one call per event.
pub trait EventSink {
    /// Store `contents` under `filename` and return where it ended up.
    fn write(&mut self, filename: &str, contents: &str) -> io::Result<PathBuf>;
}

/// Writes each document as a file in one directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Create `dir` (and its parents) if needed.
    pub fn create(dir: impl Into<PathBuf>) -> DatasetResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| DatasetError::OutputDirectory {
            path: dir.clone(),
            source,
        })?;
        Ok(DirectorySink { dir })
    }
}

impl EventSink for DirectorySink {
    fn write(&mut self, filename: &str, contents: &str) -> io::Result<PathBuf> {
        let path = self.dir.join(filename);
        std::fs::write(&path, contents)?;
        Ok(path)
    }
}

/// Keeps documents in memory. Used for dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub documents: Vec<(String, String)>,
}

impl EventSink for MemorySink {
    fn write(&mut self, filename: &str, contents: &str) -> io::Result<PathBuf> {
        self.documents
            .push((filename.to_string(), contents.to_string()));
        Ok(PathBuf::from(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_nested_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("a").join("b");
        let mut sink = DirectorySink::create(&dir).unwrap();
        assert!(dir.is_dir());

        let path = sink.write("x-1.ics", "BEGIN:VCALENDAR\r\n").unwrap();
        assert_eq!(path, dir.join("x-1.ics"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "BEGIN:VCALENDAR\r\n");
    }

    #[test]
    fn directory_blocked_by_file_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("taken");
        std::fs::write(&blocker, "").unwrap();

        let err = DirectorySink::create(blocker.join("out")).unwrap_err();
        assert!(matches!(err, DatasetError::OutputDirectory { .. }));
    }

    #[test]
    fn memory_sink_records_documents() {
        let mut sink = MemorySink::default();
        sink.write("a-1.ics", "one").unwrap();
        sink.write("b-2.ics", "two").unwrap();
        assert_eq!(sink.documents.len(), 2);
        assert_eq!(sink.documents[1], ("b-2.ics".to_string(), "two".to_string()));
    }
}
