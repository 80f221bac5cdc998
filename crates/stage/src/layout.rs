//! Item placement table.
//!
//! A secondary tile layer marks where each kitchen item sits: tile indices
//! 1 through 15 map to fixed item names. The table is built once at scene
//! setup and the cells never move afterwards. Two of the items (oven and
//! fridge) are anchors: destinations with no sprite of their own. The rest
//! are sprites that start hidden and are revealed the first time the
//! avatar reaches them.

use std::collections::HashMap;

use tracing::warn;

use crate::grid::{Cell, TileLayer};

/// Render depth for an item sprite on ordinary floor.
pub const ITEM_DEPTH_NORMAL: u32 = 200;

/// Render depth for an item sprite on a walkable-behind tile, below the
/// avatar's normal depth so the avatar can pass in front.
pub const ITEM_DEPTH_BEHIND: u32 = 150;

/// Items that are destinations only and never rendered.
pub const ANCHOR_ITEMS: [&str; 2] = ["oven", "fridge"];

/// Maps an item-positions tile index to its item name.
pub fn item_name(index: u32) -> Option<&'static str> {
    Some(match index {
        1 => "flour",
        2 => "baking_powder",
        3 => "salt",
        4 => "butter",
        5 => "sugar",
        6 => "eggs",
        7 => "vanilla_extract",
        8 => "milk",
        9 => "oven",
        10 => "mixing_bowl",
        11 => "large_bowl",
        12 => "whisk",
        13 => "mixer",
        14 => "pans",
        15 => "fridge",
        _ => return None,
    })
}

/// Sprite state for a visible kitchen item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteState {
    pub visible: bool,
    pub depth: u32,
}

/// How an item occupies the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// A pure destination (oven, fridge).
    Anchor,
    /// A placed sprite with visibility and render depth.
    Sprite(SpriteState),
}

/// One placed item.
#[derive(Debug, Clone)]
pub struct Item {
    pub name: &'static str,
    pub cell: Cell,
    pub placement: Placement,
}

impl Item {
    /// True for sprite items that have been revealed.
    pub fn is_visible(&self) -> bool {
        matches!(self.placement, Placement::Sprite(state) if state.visible)
    }
}

/// The item placement table, keyed by item name.
#[derive(Debug, Clone, Default)]
pub struct ItemTable {
    items: HashMap<&'static str, Item>,
}

impl ItemTable {
    /// Builds the table from an item-positions layer, reading the floor
    /// layer to assign sprite depths. Duplicate placements for a name keep
    /// the first and are logged.
    pub fn from_layers(positions: &impl TileLayer, floor: &impl TileLayer) -> Self {
        let mut items = HashMap::new();

        for y in 0..positions.height() {
            for x in 0..positions.width() {
                let cell = Cell::new(x, y);
                let Some(index) = positions.tile_index(cell) else {
                    continue;
                };
                let Some(name) = item_name(index) else {
                    continue;
                };
                if items.contains_key(name) {
                    warn!("duplicate placement for item '{}' at {}, keeping first", name, cell);
                    continue;
                }

                let placement = if ANCHOR_ITEMS.contains(&name) {
                    Placement::Anchor
                } else {
                    let depth = if floor.classify(cell).is_behind() {
                        ITEM_DEPTH_BEHIND
                    } else {
                        ITEM_DEPTH_NORMAL
                    };
                    Placement::Sprite(SpriteState {
                        visible: false,
                        depth,
                    })
                };

                items.insert(name, Item { name, cell, placement });
            }
        }

        Self { items }
    }

    pub fn get(&self, name: &str) -> Option<&Item> {
        self.items.get(name)
    }

    /// The grid cell of a named item, if placed.
    pub fn cell_of(&self, name: &str) -> Option<Cell> {
        self.items.get(name).map(|item| item.cell)
    }

    /// Marks a sprite item visible. Returns `true` only on the transition
    /// from hidden to visible; anchors and already-visible sprites return
    /// `false`.
    pub fn reveal(&mut self, name: &str) -> bool {
        match self.items.get_mut(name) {
            Some(Item {
                placement: Placement::Sprite(state),
                ..
            }) if !state.visible => {
                state.visible = true;
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }
}
