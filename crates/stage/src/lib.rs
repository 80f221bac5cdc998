//! Action-to-movement choreography for the bakery simulation.
//!
//! The stage turns the discrete actions reported by the simulation backend
//! into avatar movement on a 2D tile grid:
//!
//! - [`grid`]: tile coordinates and the three-way walkability oracle
//! - [`path`]: BFS pathfinding and the adjacency resolver
//! - [`layout`]: the item placement table
//! - [`motion`]: the motion player and the [`motion::MotionSink`] seam
//! - [`choreographer`]: action-to-target expansion and strict sequencing
//! - [`history`]: the snapshot log with its review cursor
//! - [`source`]: live and recorded snapshot sources
//! - [`driver`]: auto-advance and navigation control
//!
//! Rendering is deliberately absent: a real renderer implements
//! [`motion::MotionSink`] and mirrors what the stage publishes.

pub mod choreographer;
pub mod config;
pub mod driver;
pub mod grid;
pub mod history;
pub mod kitchen;
pub mod layout;
pub mod motion;
pub mod path;
pub mod sink;
pub mod source;

// Re-export grid types
pub use grid::{
    classify_index, Cell, Geometry, MapError, PixelPos, TileClass, TileLayer, TileMap,
    WALKABLE_BEHIND_TILES, WALKABLE_TILES,
};

// Re-export pathfinding
pub use path::{find_adjacent_path, find_path, find_route};

// Re-export layout types
pub use layout::{item_name, Item, ItemTable, Placement, SpriteState};

// Re-export motion types
pub use motion::{
    arrival_facing, facing_for_delta, AvatarAnim, Facing, MotionPlayer, MotionSink,
    AVATAR_DEPTH_BEHIND, AVATAR_DEPTH_NORMAL, STEP_DURATION,
};

// Re-export choreography types
pub use choreographer::{
    is_fridge_item, is_wet_ingredient, movement_targets, Choreographer, FRIDGE_ITEMS,
    WET_INGREDIENTS,
};

// Re-export history types
pub use history::{NavState, StepHistory};

// Re-export source and driver types
pub use driver::StageDriver;
pub use source::{RecordedSession, RecordingSource, SnapshotSource, SourceError};

// Re-export configuration
pub use config::{default_config_toml, ConfigError, StageConfig};
