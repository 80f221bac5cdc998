//! Ready-made [`MotionSink`] implementations.
//!
//! `ConsoleSink` narrates motion through tracing for headless runs;
//! `RecordingSink` captures the ordered event stream so tests can assert
//! on sequencing rather than timing.

use tracing::{debug, info};

use crate::grid::PixelPos;
use crate::motion::{AvatarAnim, MotionSink};

/// One observed sink notification, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Moved(PixelPos),
    Animation(AvatarAnim),
    Depth(u32),
    ItemRevealed(String),
}

/// Records every notification in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<SinkEvent>,
}

impl RecordingSink {
    /// All animation changes, in order.
    pub fn animations(&self) -> Vec<AvatarAnim> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Animation(anim) => Some(*anim),
                _ => None,
            })
            .collect()
    }

    /// All revealed item names, in order.
    pub fn revealed(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::ItemRevealed(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of depth recomputations observed.
    pub fn depth_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SinkEvent::Depth(_)))
            .count()
    }

    /// Index of the first event matching `predicate`, if any.
    pub fn position_of(&self, predicate: impl Fn(&SinkEvent) -> bool) -> Option<usize> {
        self.events.iter().position(predicate)
    }
}

impl MotionSink for RecordingSink {
    fn avatar_moved(&mut self, pos: PixelPos) {
        self.events.push(SinkEvent::Moved(pos));
    }

    fn animation_changed(&mut self, anim: AvatarAnim) {
        self.events.push(SinkEvent::Animation(anim));
    }

    fn depth_changed(&mut self, depth: u32) {
        self.events.push(SinkEvent::Depth(depth));
    }

    fn item_revealed(&mut self, name: &str) {
        self.events.push(SinkEvent::ItemRevealed(name.to_string()));
    }
}

/// Logs motion through tracing. Position updates are high-volume and go to
/// debug; animation switches and reveals are the interesting beats.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl MotionSink for ConsoleSink {
    fn avatar_moved(&mut self, pos: PixelPos) {
        debug!("avatar at ({:.0}, {:.0})", pos.x, pos.y);
    }

    fn animation_changed(&mut self, anim: AvatarAnim) {
        debug!("animation -> {}", anim);
    }

    fn depth_changed(&mut self, depth: u32) {
        debug!("avatar depth -> {}", depth);
    }

    fn item_revealed(&mut self, name: &str) {
        info!("revealed {}", name);
    }
}
