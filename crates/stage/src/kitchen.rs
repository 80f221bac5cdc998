//! The built-in kitchen scene.
//!
//! An 8x8 kitchen: counters along the back wall hold the dry goods, the
//! dairy sits on the walk-behind strip by the fridge, a center island
//! carries the two bowls with the whisk and mixer tucked behind it, and
//! the pans wait on the bottom counter. The layers are embedded so the
//! stage runs without any files on disk.

use std::time::Duration;

use crate::choreographer::Choreographer;
use crate::grid::{Cell, Geometry, TileMap};
use crate::layout::ItemTable;

/// The kitchen floor tile layer.
pub const KITCHEN_TILEMAP_CSV: &str = include_str!("../assets/kitchen_tilemap.csv");

/// The item-positions layer (indices 1-15).
pub const ITEM_POSITIONS_CSV: &str = include_str!("../assets/item_positions.csv");

/// Where the avatar stands when the scene opens.
pub const AVATAR_START: Cell = Cell::new(4, 5);

/// Parses the embedded floor layer.
pub fn floor_layer() -> TileMap {
    TileMap::from_csv(KITCHEN_TILEMAP_CSV).expect("embedded kitchen map is valid")
}

/// Builds the item table for the embedded scene.
pub fn item_table() -> ItemTable {
    let floor = floor_layer();
    let positions =
        TileMap::from_csv(ITEM_POSITIONS_CSV).expect("embedded item positions are valid");
    ItemTable::from_layers(&positions, &floor)
}

/// A choreographer set up on the embedded kitchen with the avatar at its
/// starting cell.
pub fn default_choreographer(geometry: Geometry, step_duration: Duration) -> Choreographer {
    Choreographer::new(floor_layer(), item_table(), geometry, AVATAR_START, step_duration)
}
