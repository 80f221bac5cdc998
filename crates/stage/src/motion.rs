//! Avatar motion playback.
//!
//! The motion player consumes a path one cell at a time: each step is a
//! fixed-duration linear tween of the avatar's pixel position to the next
//! cell center, with a walking animation facing the direction of travel.
//! The player owns the tween math and is advanced by `tick`; everything a
//! renderer needs to mirror the motion is published through [`MotionSink`].

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use crate::grid::{Cell, Geometry, PixelPos, TileLayer};

/// Render depth of the avatar on ordinary floor.
pub const AVATAR_DEPTH_NORMAL: u32 = 150;

/// Render depth of the avatar on a walkable-behind tile, below the sprites
/// placed there so the avatar appears behind them.
pub const AVATAR_DEPTH_BEHIND: u32 = 90;

/// Duration of one cell-to-cell tween.
pub const STEP_DURATION: Duration = Duration::from_millis(200);

/// The four directions the avatar can face. Front faces the viewer
/// (positive y), back faces away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Front,
    Back,
    Left,
    Right,
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Facing::Front => write!(f, "front"),
            Facing::Back => write!(f, "back"),
            Facing::Left => write!(f, "left"),
            Facing::Right => write!(f, "right"),
        }
    }
}

/// Avatar animation selection: a walk cycle while moving, an idle pose at
/// rest, each with a facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarAnim {
    Idle(Facing),
    Walk(Facing),
}

impl fmt::Display for AvatarAnim {
    /// Animation key in the sprite sheet convention, e.g. "walk_front".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvatarAnim::Idle(facing) => write!(f, "idle_{}", facing),
            AvatarAnim::Walk(facing) => write!(f, "walk_{}", facing),
        }
    }
}

/// Chooses a facing from a movement delta.
///
/// Horizontal dominance picks left/right by the sign of dx; vertical
/// dominance or a tie picks front/back by the sign of dy, with dy = 0
/// defaulting to front.
pub fn facing_for_delta(dx: f32, dy: f32) -> Facing {
    if dx.abs() > dy.abs() {
        if dx > 0.0 {
            Facing::Right
        } else {
            Facing::Left
        }
    } else if dy > 0.0 {
        Facing::Front
    } else if dy < 0.0 {
        Facing::Back
    } else {
        Facing::Front
    }
}

/// Chooses the idle facing after arrival: toward the target cell, forced
/// to front when the target tile is walkable-behind so the avatar always
/// faces into the object it stepped behind.
pub fn arrival_facing(avatar: Cell, target: Cell, target_behind: bool) -> Facing {
    if target_behind {
        Facing::Front
    } else {
        facing_for_delta((target.x - avatar.x) as f32, (target.y - avatar.y) as f32)
    }
}

/// Narrow interface the rendering collaborator implements to mirror avatar
/// motion. All methods are notifications; the stage never reads back.
pub trait MotionSink {
    /// The avatar's pixel position changed mid-tween.
    fn avatar_moved(&mut self, pos: PixelPos);
    /// The avatar switched walk/idle animation.
    fn animation_changed(&mut self, anim: AvatarAnim);
    /// The avatar's render depth was recomputed.
    fn depth_changed(&mut self, depth: u32);
    /// A hidden item sprite became visible.
    fn item_revealed(&mut self, name: &str);
}

/// An in-flight tween between two pixel positions.
#[derive(Debug, Clone)]
struct Tween {
    from: PixelPos,
    to: PixelPos,
    elapsed: Duration,
    duration: Duration,
}

impl Tween {
    fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            1.0
        } else {
            (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        }
    }

    fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Plays one path at a time, cell by cell. Not reusable mid-flight: a new
/// path may only begin once the previous one has been reported finished.
#[derive(Debug)]
pub struct MotionPlayer {
    geometry: Geometry,
    position: PixelPos,
    path: VecDeque<Cell>,
    tween: Option<Tween>,
    active: bool,
    step_duration: Duration,
}

impl MotionPlayer {
    pub fn new(geometry: Geometry, start: Cell, step_duration: Duration) -> Self {
        Self {
            geometry,
            position: geometry.cell_center(start),
            path: VecDeque::new(),
            tween: None,
            active: false,
            step_duration,
        }
    }

    /// The avatar's current pixel position.
    pub fn position(&self) -> PixelPos {
        self.position
    }

    /// The grid cell the avatar currently occupies.
    pub fn cell(&self) -> Cell {
        self.geometry.cell_of(self.position)
    }

    /// True when no path is being played.
    pub fn is_idle(&self) -> bool {
        !self.active
    }

    /// Begins playing a path. The path is consumed during playback.
    ///
    /// Must only be called while idle; the caller enforces strict
    /// sequencing of one motion at a time.
    pub fn begin(&mut self, path: Vec<Cell>) {
        debug_assert!(self.is_idle(), "began a path while one is in flight");
        self.path = path.into();
        self.active = true;
    }

    /// Advances playback by `dt`. Returns `true` exactly once per path,
    /// on the tick the path is exhausted. An empty path finishes on the
    /// first tick after a single depth recompute, with no animation.
    pub fn tick(&mut self, dt: Duration, layer: &impl TileLayer, sink: &mut dyn MotionSink) -> bool {
        if !self.active {
            return false;
        }

        let mut remaining = dt;
        loop {
            if let Some(tween) = self.tween.as_mut() {
                let left = tween.duration.saturating_sub(tween.elapsed);
                let step = remaining.min(left);
                tween.elapsed += step;
                remaining = remaining.saturating_sub(step);

                let position = tween.from.lerp(tween.to, tween.progress());
                let finished = tween.finished();
                self.position = position;
                sink.avatar_moved(position);

                if finished {
                    self.tween = None;
                    self.publish_depth(layer, sink);
                } else {
                    return false;
                }
            } else if let Some(next) = self.path.pop_front() {
                let to = self.geometry.cell_center(next);
                let facing = facing_for_delta(to.x - self.position.x, to.y - self.position.y);
                sink.animation_changed(AvatarAnim::Walk(facing));
                self.tween = Some(Tween {
                    from: self.position,
                    to,
                    elapsed: Duration::ZERO,
                    duration: self.step_duration,
                });
                if remaining.is_zero() && !self.step_duration.is_zero() {
                    return false;
                }
            } else {
                self.publish_depth(layer, sink);
                self.active = false;
                return true;
            }
        }
    }

    /// Recomputes and publishes the avatar's render depth from the class
    /// of the cell it stands on.
    pub fn publish_depth(&self, layer: &impl TileLayer, sink: &mut dyn MotionSink) {
        let depth = if layer.classify(self.cell()).is_behind() {
            AVATAR_DEPTH_BEHIND
        } else {
            AVATAR_DEPTH_NORMAL
        };
        sink.depth_changed(depth);
    }
}
