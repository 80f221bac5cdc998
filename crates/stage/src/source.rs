//! Snapshot sources.
//!
//! The stage does not care where steps come from: a live in-process
//! baking session, or a finished JSONL recording being replayed. Both sit
//! behind [`SnapshotSource`], the seam where an HTTP client would attach
//! in a networked deployment.

use std::fs;
use std::path::Path;

use bake_events::StepSnapshot;
use kitchen_sim::record::SessionWriter;
use kitchen_sim::BakingSession;
use thiserror::Error;

/// Errors surfaced by snapshot sources.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("recording exhausted")]
    Exhausted,
    #[error("failed to read recording: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to record snapshot: {0}")]
    Record(#[from] kitchen_sim::record::RecordError),
}

/// Delivers one snapshot per simulation step.
pub trait SnapshotSource {
    /// Resets the run and returns the initial snapshot.
    fn start(&mut self) -> Result<StepSnapshot, SourceError>;

    /// Advances one step and returns its snapshot.
    fn advance(&mut self) -> Result<StepSnapshot, SourceError>;
}

impl SnapshotSource for BakingSession {
    fn start(&mut self) -> Result<StepSnapshot, SourceError> {
        Ok(self.start_baking())
    }

    fn advance(&mut self) -> Result<StepSnapshot, SourceError> {
        Ok(self.next_step())
    }
}

/// Replays a previously recorded session.
#[derive(Debug)]
pub struct RecordedSession {
    snapshots: Vec<StepSnapshot>,
    next: usize,
}

impl RecordedSession {
    pub fn from_snapshots(snapshots: Vec<StepSnapshot>) -> Self {
        Self { snapshots, next: 0 }
    }

    /// Loads a JSONL recording, one snapshot per line.
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let content = fs::read_to_string(path)?;
        let snapshots = content
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(serde_json::from_str)
            .collect::<Result<Vec<StepSnapshot>, _>>()?;
        Ok(Self::from_snapshots(snapshots))
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl SnapshotSource for RecordedSession {
    fn start(&mut self) -> Result<StepSnapshot, SourceError> {
        self.next = 0;
        self.advance()
    }

    fn advance(&mut self) -> Result<StepSnapshot, SourceError> {
        let snapshot = self.snapshots.get(self.next).ok_or(SourceError::Exhausted)?;
        self.next += 1;
        Ok(snapshot.clone())
    }
}

/// Wraps a source and appends every delivered snapshot to a JSONL
/// recording.
pub struct RecordingSource<S> {
    inner: S,
    writer: SessionWriter,
}

impl<S: SnapshotSource> RecordingSource<S> {
    pub fn new(inner: S, writer: SessionWriter) -> Self {
        Self { inner, writer }
    }
}

impl<S: SnapshotSource> SnapshotSource for RecordingSource<S> {
    fn start(&mut self) -> Result<StepSnapshot, SourceError> {
        let snapshot = self.inner.start()?;
        self.writer.append(&snapshot)?;
        Ok(snapshot)
    }

    fn advance(&mut self) -> Result<StepSnapshot, SourceError> {
        let snapshot = self.inner.advance()?;
        self.writer.append(&snapshot)?;
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bake_events::fixtures;

    #[test]
    fn test_recorded_session_replays_in_order() {
        let mut source = RecordedSession::from_snapshots(fixtures::sample_session());
        assert_eq!(source.len(), 5);

        let first = source.start().unwrap();
        assert!(first.message.is_some());

        let mut last = first;
        while let Ok(snapshot) = source.advance() {
            last = snapshot;
        }
        assert!(last.completed);
    }

    #[test]
    fn test_recorded_session_exhausts() {
        let mut source = RecordedSession::from_snapshots(vec![fixtures::initial_snapshot()]);
        source.start().unwrap();
        assert!(matches!(source.advance(), Err(SourceError::Exhausted)));
    }

    #[test]
    fn test_recorded_session_start_rewinds() {
        let mut source = RecordedSession::from_snapshots(fixtures::sample_session());
        source.start().unwrap();
        source.advance().unwrap();
        let first_again = source.start().unwrap();
        assert!(first_again.message.is_some());
    }
}
