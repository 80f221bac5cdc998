//! The stage driver: glues source, history, and choreography together.
//!
//! Mirrors the control surface of the original viewer: an auto-advance
//! timer that periodically requests the next step, manual forward/back
//! navigation over the history, and a pause that only stops scheduling of
//! future steps. A new step is never requested while a batch is still
//! animating - the interval elapsing just arms the driver, and the
//! request fires on the first idle tick after it.

use std::time::Duration;

use bake_events::StepSnapshot;
use tracing::{debug, info};

use crate::choreographer::Choreographer;
use crate::history::{NavState, StepHistory};
use crate::motion::MotionSink;
use crate::source::{SnapshotSource, SourceError};

/// Drives a full viewing session.
pub struct StageDriver<S> {
    source: S,
    history: StepHistory,
    choreographer: Choreographer,
    auto_advance: Duration,
    since_advance: Duration,
    playing: bool,
    finished: bool,
}

impl<S: SnapshotSource> StageDriver<S> {
    pub fn new(source: S, choreographer: Choreographer, auto_advance: Duration) -> Self {
        Self {
            source,
            history: StepHistory::new(),
            choreographer,
            auto_advance,
            since_advance: Duration::ZERO,
            playing: false,
            finished: false,
        }
    }

    pub fn history(&self) -> &StepHistory {
        &self.history
    }

    pub fn choreographer(&self) -> &Choreographer {
        &self.choreographer
    }

    /// True once a terminal snapshot has been received.
    pub fn finished(&self) -> bool {
        self.finished
    }

    /// True when the terminal snapshot has been received and its animation
    /// has settled.
    pub fn settled(&self) -> bool {
        self.finished && self.choreographer.is_idle()
    }

    pub fn nav(&self) -> NavState {
        self.history.nav()
    }

    /// Fetches the initial snapshot and begins the session.
    pub fn start(&mut self) -> Result<&StepSnapshot, SourceError> {
        let snapshot = self.source.start()?;
        self.apply_snapshot(snapshot);
        Ok(self.history.current().expect("snapshot was just pushed"))
    }

    /// Enables the auto-advance timer.
    pub fn play(&mut self) {
        self.playing = true;
    }

    /// Stops scheduling future steps. Motion already in progress is not
    /// interrupted.
    pub fn pause(&mut self) {
        self.playing = false;
        self.since_advance = Duration::ZERO;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Advances animation and, when the auto-advance interval has elapsed
    /// and the previous batch has settled, requests the next step.
    pub fn tick(&mut self, dt: Duration, sink: &mut dyn MotionSink) -> Result<(), SourceError> {
        self.choreographer.tick(dt, sink);

        if self.playing && !self.finished {
            self.since_advance = (self.since_advance + dt).min(self.auto_advance);
            if self.since_advance >= self.auto_advance {
                if self.choreographer.is_idle() {
                    self.since_advance = Duration::ZERO;
                    self.next_step()?;
                } else {
                    debug!("auto-advance deferred: batch still animating");
                }
            }
        }

        Ok(())
    }

    /// Steps forward: replays the next known snapshot if the cursor is
    /// reviewing history, otherwise requests a fresh one from the source.
    /// Ignored while a batch is animating.
    pub fn next_step(&mut self) -> Result<Option<&StepSnapshot>, SourceError> {
        if !self.choreographer.is_idle() {
            debug!("ignoring step request: batch still animating");
            return Ok(None);
        }

        if !self.history.at_latest() {
            if let Some(snapshot) = self.history.step_forward().cloned() {
                self.choreographer.enqueue(&snapshot.executed_actions);
                return Ok(self.history.current());
            }
        }

        if self.finished {
            return Ok(None);
        }

        let snapshot = self.source.advance()?;
        self.apply_snapshot(snapshot);
        Ok(self.history.current())
    }

    /// Steps back through history, replaying that step's movement.
    /// Ignored while a batch is animating or at the start of history.
    pub fn prev_step(&mut self, replay_motion: bool) -> Option<&StepSnapshot> {
        if !self.choreographer.is_idle() {
            debug!("ignoring step request: batch still animating");
            return None;
        }
        if self.history.cursor() == 0 {
            return self.history.current();
        }

        let snapshot = self.history.step_back().cloned()?;
        if replay_motion {
            self.choreographer.enqueue(&snapshot.executed_actions);
        }
        self.history.current()
    }

    /// Pushes a snapshot into history and queues its movement.
    fn apply_snapshot(&mut self, snapshot: StepSnapshot) {
        self.choreographer.enqueue(&snapshot.executed_actions);
        if snapshot.completed {
            self.finished = true;
            self.playing = false;
            if let Some(outcome) = snapshot.run_outcome() {
                info!("run complete: {}", outcome);
            }
        }
        self.history.push(snapshot);
    }
}
