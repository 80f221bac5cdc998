//! Append-only snapshot history with a review cursor.
//!
//! Every snapshot received from the simulation is pushed here; the cursor
//! lets the viewer step back through earlier states and forward again,
//! independent of live progression. Pushing always jumps the cursor to the
//! newest entry.

use bake_events::StepSnapshot;

/// Which navigation directions are currently available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavState {
    pub back_enabled: bool,
    pub forward_enabled: bool,
}

/// Ordered log of received snapshots plus a zero-based cursor.
#[derive(Debug, Default)]
pub struct StepHistory {
    snapshots: Vec<StepSnapshot>,
    cursor: usize,
}

impl StepHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a snapshot and relocates the cursor to it.
    pub fn push(&mut self, snapshot: StepSnapshot) {
        self.snapshots.push(snapshot);
        self.cursor = self.snapshots.len() - 1;
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The snapshot under the cursor.
    pub fn current(&self) -> Option<&StepSnapshot> {
        self.snapshots.get(self.cursor)
    }

    /// True when the cursor sits on the newest snapshot.
    pub fn at_latest(&self) -> bool {
        !self.is_empty() && self.cursor == self.snapshots.len() - 1
    }

    /// Moves the cursor one step back and returns the snapshot there.
    /// At the lower bound this is a no-op that returns the current
    /// snapshot unchanged.
    pub fn step_back(&mut self) -> Option<&StepSnapshot> {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
        self.current()
    }

    /// Moves the cursor one step forward and returns the snapshot there.
    /// Returns `None` at the upper bound: there is nothing newer in the
    /// log, and the caller is expected to request a fresh snapshot from
    /// the simulation instead.
    pub fn step_forward(&mut self) -> Option<&StepSnapshot> {
        if self.cursor + 1 < self.snapshots.len() {
            self.cursor += 1;
            self.current()
        } else {
            None
        }
    }

    /// Navigation availability: back is blocked at index zero; forward is
    /// only blocked once the cursor sits on a terminal snapshot at the end
    /// of the log.
    pub fn nav(&self) -> NavState {
        let back_enabled = self.cursor > 0;
        let forward_enabled = match self.current() {
            Some(current) => !(self.at_latest() && current.completed),
            None => false,
        };
        NavState {
            back_enabled,
            forward_enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bake_events::{Progress, RunOutcome};

    fn snapshot(label: &str) -> StepSnapshot {
        StepSnapshot::step(label, Progress::default())
    }

    #[test]
    fn test_push_relocates_cursor() {
        let mut history = StepHistory::new();
        history.push(snapshot("first"));
        assert_eq!(history.cursor(), 0);
        history.push(snapshot("second"));
        history.push(snapshot("third"));
        assert_eq!(history.cursor(), 2);
        assert_eq!(history.current().unwrap().display_message(), "third");
    }

    #[test]
    fn test_back_twice_forward_once_lands_on_second() {
        let mut history = StepHistory::new();
        history.push(snapshot("first"));
        history.push(snapshot("second"));
        history.push(snapshot("third"));

        history.step_back();
        history.step_back();
        assert_eq!(history.current().unwrap().display_message(), "first");

        let snapshot = history.step_forward().unwrap();
        assert_eq!(snapshot.display_message(), "second");
    }

    #[test]
    fn test_step_back_at_zero_is_a_no_op() {
        let mut history = StepHistory::new();
        history.push(snapshot("only"));

        let same = history.step_back().unwrap();
        assert_eq!(same.display_message(), "only");
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn test_step_forward_at_end_returns_none() {
        let mut history = StepHistory::new();
        history.push(snapshot("only"));
        assert!(history.step_forward().is_none());
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn test_empty_history() {
        let mut history = StepHistory::new();
        assert!(history.current().is_none());
        assert!(history.step_back().is_none());
        assert!(history.step_forward().is_none());
        assert_eq!(
            history.nav(),
            NavState {
                back_enabled: false,
                forward_enabled: false
            }
        );
    }

    #[test]
    fn test_nav_gating() {
        let mut history = StepHistory::new();
        history.push(snapshot("first"));
        // One in-progress snapshot: forward stays enabled (ask the
        // simulation for more), back disabled.
        assert_eq!(
            history.nav(),
            NavState {
                back_enabled: false,
                forward_enabled: true
            }
        );

        history.push(snapshot("second").finish("done", RunOutcome::Success));
        // Cursor on a terminal snapshot at the end: forward blocked.
        assert_eq!(
            history.nav(),
            NavState {
                back_enabled: true,
                forward_enabled: false
            }
        );

        // Reviewing an older snapshot re-enables forward.
        history.step_back();
        assert_eq!(
            history.nav(),
            NavState {
                back_enabled: false,
                forward_enabled: true
            }
        );
    }
}
