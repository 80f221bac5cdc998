//! Action sequencing: turning executed actions into avatar movement.
//!
//! Each domain action expands into one or two movement targets (fetch the
//! ingredient, carry it to the right bowl). Targets are played strictly in
//! order: the next leg's pathfinding only runs once the previous leg's
//! motion has fully settled, so the avatar's start cell is always current.
//! Failures never stall the queue - a missing placement or unreachable
//! target skips the animation and moves on.

use std::collections::VecDeque;
use std::time::Duration;

use bake_events::Action;
use tracing::debug;

use crate::grid::{Cell, Geometry, TileLayer, TileMap};
use crate::layout::ItemTable;
use crate::motion::{arrival_facing, AvatarAnim, MotionPlayer, MotionSink};
use crate::path::find_route;

/// Ingredients that go into the large bowl rather than the mixing bowl.
pub const WET_INGREDIENTS: [&str; 5] = ["butter", "sugar", "eggs", "vanilla_extract", "milk"];

/// Ingredients stored in the fridge. Moving to one routes through the
/// fridge anchor first: open the fridge, then reach in.
pub const FRIDGE_ITEMS: [&str; 3] = ["butter", "milk", "eggs"];

pub fn is_wet_ingredient(name: &str) -> bool {
    WET_INGREDIENTS.iter().any(|w| name.eq_ignore_ascii_case(w))
}

pub fn is_fridge_item(name: &str) -> bool {
    FRIDGE_ITEMS.iter().any(|f| name.eq_ignore_ascii_case(f))
}

/// Expands one action into its ordered movement targets.
///
/// Unrecognized action names and missing arguments expand to nothing; the
/// queue keeps going either way.
pub fn movement_targets(action: &Action) -> Vec<String> {
    match action.name.as_str() {
        "add_ingredient" => match action.first_arg() {
            Some(ingredient) => {
                let bowl = if is_wet_ingredient(ingredient) {
                    "large_bowl"
                } else {
                    "mixing_bowl"
                };
                vec![ingredient.to_lowercase(), bowl.to_string()]
            }
            None => {
                debug!("add_ingredient without an ingredient argument");
                Vec::new()
            }
        },
        "use_tool" => match action.first_arg() {
            Some(tool) => vec![tool.to_lowercase()],
            None => {
                debug!("use_tool without a tool argument");
                Vec::new()
            }
        },
        "preheat_oven" => vec!["oven".to_string()],
        "mix_ingredients" => match action.first_arg() {
            Some(kind) if kind.eq_ignore_ascii_case("dry") => {
                vec!["mixing_bowl".to_string(), "whisk".to_string()]
            }
            Some(kind)
                if kind.eq_ignore_ascii_case("wet") || kind.eq_ignore_ascii_case("cream") =>
            {
                vec!["large_bowl".to_string(), "mixer".to_string()]
            }
            _ => Vec::new(),
        },
        "combine_all_ingredients" => vec!["mixing_bowl".to_string(), "large_bowl".to_string()],
        "pour_batter" => vec!["large_bowl".to_string(), "pans".to_string()],
        "bake_cake" => vec!["pans".to_string(), "oven".to_string()],
        "cool_cake" => vec!["oven".to_string(), "pans".to_string()],
        other => {
            debug!("unknown action '{}', skipping", other);
            Vec::new()
        }
    }
}

/// Bookkeeping for the leg currently in flight.
#[derive(Debug)]
struct PendingArrival {
    /// The item cell being approached.
    target: Cell,
    /// Whether the target tile is walkable-behind.
    behind: bool,
    /// The item to reveal on arrival.
    item: String,
}

/// Drives the avatar through the movement targets of a batch of actions.
///
/// Single mutation entry point is [`tick`](Self::tick); one leg is in
/// flight at a time, so avatar position, facing, depth, and item
/// visibility are only ever touched by one movement step.
#[derive(Debug)]
pub struct Choreographer {
    map: TileMap,
    items: ItemTable,
    player: MotionPlayer,
    legs: VecDeque<String>,
    arrival: Option<PendingArrival>,
}

impl Choreographer {
    pub fn new(
        map: TileMap,
        items: ItemTable,
        geometry: Geometry,
        start: Cell,
        step_duration: Duration,
    ) -> Self {
        Self {
            map,
            items,
            player: MotionPlayer::new(geometry, start, step_duration),
            legs: VecDeque::new(),
            arrival: None,
        }
    }

    /// The cell the avatar currently occupies.
    pub fn avatar_cell(&self) -> Cell {
        self.player.cell()
    }

    pub fn items(&self) -> &ItemTable {
        &self.items
    }

    /// True when no motion is in flight and no legs are queued.
    pub fn is_idle(&self) -> bool {
        self.player.is_idle() && self.legs.is_empty()
    }

    /// Queues the movement for a batch of executed actions, in order.
    pub fn enqueue(&mut self, actions: &[Action]) {
        for action in actions {
            for target in movement_targets(action) {
                self.push_target(target);
            }
        }
    }

    /// Advances animation by `dt`. When a leg finishes, its arrival
    /// effects run (reveal, idle pose, depth) and the next leg is routed
    /// immediately.
    pub fn tick(&mut self, dt: Duration, sink: &mut dyn MotionSink) {
        if !self.player.is_idle() && self.player.tick(dt, &self.map, sink) {
            self.finish_leg(sink);
        }

        while self.player.is_idle() {
            match self.legs.pop_front() {
                Some(target) => self.start_leg(&target),
                None => break,
            }
        }
    }

    fn push_target(&mut self, name: String) {
        if is_fridge_item(&name) {
            // No fridge placed means the whole fetch is skipped, matching
            // the scene this table was loaded from.
            if self.items.get("fridge").is_some() {
                self.legs.push_back("fridge".to_string());
                self.legs.push_back(name);
            } else {
                debug!("no fridge placement, skipping move to {}", name);
            }
        } else {
            self.legs.push_back(name);
        }
    }

    /// Routes one leg and starts the motion player on it. Skips silently
    /// (with a diagnostic) when the item has no placement or no path
    /// exists; animation fidelity is best-effort.
    fn start_leg(&mut self, name: &str) {
        let Some(target) = self.items.cell_of(name) else {
            debug!("no placement for '{}', skipping move", name);
            return;
        };

        let behind = self.map.classify(target).is_behind();
        let start = self.player.cell();
        match find_route(&self.map, start, target) {
            Some(path) => {
                self.arrival = Some(PendingArrival {
                    target,
                    behind,
                    item: name.to_string(),
                });
                self.player.begin(path);
            }
            None => {
                debug!("no path from {} to '{}' at {}, skipping", start, name, target);
            }
        }
    }

    /// Arrival effects, in order: reveal the item if still hidden, strike
    /// the idle pose toward it, recompute render depth.
    fn finish_leg(&mut self, sink: &mut dyn MotionSink) {
        let Some(arrival) = self.arrival.take() else {
            return;
        };

        if self.items.reveal(&arrival.item) {
            sink.item_revealed(&arrival.item);
        }

        let facing = arrival_facing(self.player.cell(), arrival.target, arrival.behind);
        sink.animation_changed(AvatarAnim::Idle(facing));
        self.player.publish_depth(&self.map, sink);
    }
}
