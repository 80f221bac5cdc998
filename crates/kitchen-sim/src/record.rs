//! Session recording: snapshots as JSONL, one per line.
//!
//! A recorded file replays anywhere without the simulation, which is also
//! how old sessions (without the explicit outcome field) stay loadable.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;
use tracing::info;

use bake_events::StepSnapshot;

/// Errors while writing or reading a recording.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Appends snapshots to a JSONL file, flushing after every line so a
/// crashed run still leaves a usable prefix.
#[derive(Debug)]
pub struct SessionWriter {
    out: BufWriter<File>,
    count: usize,
}

impl SessionWriter {
    /// Creates (or truncates) the recording file.
    pub fn create(path: &Path) -> Result<Self, RecordError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        info!("recording session to {}", path.display());
        Ok(Self {
            out: BufWriter::new(file),
            count: 0,
        })
    }

    pub fn append(&mut self, snapshot: &StepSnapshot) -> Result<(), RecordError> {
        let line = serde_json::to_string(snapshot)?;
        writeln!(self.out, "{}", line)?;
        self.out.flush()?;
        self.count += 1;
        Ok(())
    }

    /// Number of snapshots written so far.
    pub fn count(&self) -> usize {
        self.count
    }
}

/// Reads a recorded session back.
pub struct SessionReader;

impl SessionReader {
    /// Loads every snapshot from a JSONL file, in order.
    pub fn read_path(path: &Path) -> Result<Vec<StepSnapshot>, RecordError> {
        let content = std::fs::read_to_string(path)?;
        content
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).map_err(RecordError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baker::Baker;
    use crate::session::BakingSession;

    #[test]
    fn test_write_then_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.jsonl");

        let mut session = BakingSession::new(Baker::scripted());
        let mut writer = SessionWriter::create(&path).unwrap();

        let mut written = vec![session.start_baking()];
        writer.append(&written[0]).unwrap();
        loop {
            let snapshot = session.next_step();
            writer.append(&snapshot).unwrap();
            let completed = snapshot.completed;
            written.push(snapshot);
            if completed {
                break;
            }
        }
        assert_eq!(writer.count(), written.len());

        let read = SessionReader::read_path(&path).unwrap();
        assert_eq!(read, written);
    }

    #[test]
    fn test_create_makes_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/output/session.jsonl");
        let writer = SessionWriter::create(&path).unwrap();
        assert_eq!(writer.count(), 0);
        assert!(path.exists());
    }

    #[test]
    fn test_read_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.jsonl");
        assert!(matches!(
            SessionReader::read_path(&path),
            Err(RecordError::Io(_))
        ));
    }

    #[test]
    fn test_read_garbage_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.jsonl");
        std::fs::write(&path, "not json\n").unwrap();
        assert!(matches!(
            SessionReader::read_path(&path),
            Err(RecordError::Serde(_))
        ));
    }
}
