//! Tile grid, coordinates, and walkability classification.
//!
//! The stage is an integer grid of tiles. Every tile index falls into
//! exactly one of three passability classes: ordinary walkable floor,
//! walkable-behind (the avatar may stand there, but sprites on the tile
//! render in front of it), and blocked. Classification is a pure function
//! of the tile index against two fixed, disjoint membership sets.

use std::fmt;
use thiserror::Error;

/// Tile indices the avatar may stand on and enter directly.
pub const WALKABLE_TILES: [u32; 5] = [0, 98, 99, 100, 101];

/// Tile indices that are walkable but render the avatar behind any sprite
/// placed on them.
pub const WALKABLE_BEHIND_TILES: [u32; 6] = [110, 111, 112, 136, 137, 138];

/// An integer grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell offset by (dx, dy).
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A position in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPos {
    pub x: f32,
    pub y: f32,
}

impl PixelPos {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Linear interpolation toward `other` at parameter `t` in [0, 1].
    pub fn lerp(self, other: PixelPos, t: f32) -> PixelPos {
        PixelPos::new(self.x + (other.x - self.x) * t, self.y + (other.y - self.y) * t)
    }
}

/// Pixel geometry of the tile grid: tile size in source pixels and the
/// integer upscale factor applied on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub tile_size: u32,
    pub scale: u32,
}

impl Geometry {
    /// Screen-pixel edge length of one grid cell.
    pub fn cell_pixels(&self) -> f32 {
        (self.tile_size * self.scale) as f32
    }

    /// Pixel position of the center of a cell.
    pub fn cell_center(&self, cell: Cell) -> PixelPos {
        let edge = self.cell_pixels();
        PixelPos::new(
            cell.x as f32 * edge + edge / 2.0,
            cell.y as f32 * edge + edge / 2.0,
        )
    }

    /// The cell containing a pixel position.
    pub fn cell_of(&self, pos: PixelPos) -> Cell {
        let edge = self.cell_pixels();
        Cell::new((pos.x / edge).floor() as i32, (pos.y / edge).floor() as i32)
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            tile_size: 16,
            scale: 4,
        }
    }
}

/// Passability class of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileClass {
    /// Ordinary floor: standable and directly enterable.
    Walkable,
    /// Standable, but the avatar renders behind sprites on this tile.
    WalkableBehind,
    /// Impassable.
    Blocked,
}

impl TileClass {
    pub fn is_walkable(self) -> bool {
        self != TileClass::Blocked
    }

    pub fn is_behind(self) -> bool {
        self == TileClass::WalkableBehind
    }
}

/// Classifies a raw tile index.
pub fn classify_index(index: u32) -> TileClass {
    if WALKABLE_TILES.contains(&index) {
        TileClass::Walkable
    } else if WALKABLE_BEHIND_TILES.contains(&index) {
        TileClass::WalkableBehind
    } else {
        TileClass::Blocked
    }
}

/// Read-only oracle over a tile layer.
///
/// The rendering collaborator owns the real layer; the stage only ever
/// reads tile indices through this trait. Classification is provided on
/// the trait so all layers share one set of passability rules.
pub trait TileLayer {
    fn width(&self) -> i32;
    fn height(&self) -> i32;

    /// The tile index at a cell, or `None` where no tile is loaded.
    fn tile_index(&self, cell: Cell) -> Option<u32>;

    /// Passability class of a cell. Out-of-bounds cells and cells with no
    /// tile are blocked.
    fn classify(&self, cell: Cell) -> TileClass {
        if cell.x < 0 || cell.y < 0 || cell.x >= self.width() || cell.y >= self.height() {
            return TileClass::Blocked;
        }
        match self.tile_index(cell) {
            Some(index) => classify_index(index),
            None => TileClass::Blocked,
        }
    }

    fn is_walkable(&self, cell: Cell) -> bool {
        self.classify(cell).is_walkable()
    }
}

/// Errors raised while parsing a tile layer from CSV.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("tile map is empty")]
    Empty,
    #[error("row {row} has {got} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },
    #[error("invalid tile index '{value}' at row {row}, column {col}")]
    InvalidIndex {
        row: usize,
        col: usize,
        value: String,
    },
}

/// A concrete tile layer parsed from CSV, one row per line.
///
/// The value `-1` marks a cell with no tile, matching the export format of
/// common tile map editors.
#[derive(Debug, Clone)]
pub struct TileMap {
    width: i32,
    height: i32,
    tiles: Vec<Option<u32>>,
}

impl TileMap {
    /// Parses a CSV tile layer.
    pub fn from_csv(content: &str) -> Result<Self, MapError> {
        let mut tiles = Vec::new();
        let mut width = 0usize;
        let mut height = 0usize;

        for (row, line) in content.lines().filter(|l| !l.trim().is_empty()).enumerate() {
            let values: Vec<&str> = line.split(',').map(str::trim).collect();
            if row == 0 {
                width = values.len();
            } else if values.len() != width {
                return Err(MapError::RaggedRow {
                    row,
                    expected: width,
                    got: values.len(),
                });
            }
            for (col, value) in values.iter().enumerate() {
                if *value == "-1" {
                    tiles.push(None);
                } else {
                    let index = value.parse::<u32>().map_err(|_| MapError::InvalidIndex {
                        row,
                        col,
                        value: value.to_string(),
                    })?;
                    tiles.push(Some(index));
                }
            }
            height = row + 1;
        }

        if width == 0 || height == 0 {
            return Err(MapError::Empty);
        }

        Ok(Self {
            width: width as i32,
            height: height as i32,
            tiles,
        })
    }

    /// Builds a map with every cell set to the same tile index. Handy for
    /// tests that want an open floor.
    pub fn filled(width: i32, height: i32, index: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![Some(index); (width * height) as usize],
        }
    }

    /// Iterates all cells that carry a tile, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (Cell, u32)> + '_ {
        let width = self.width;
        self.tiles.iter().enumerate().filter_map(move |(i, tile)| {
            tile.map(|index| (Cell::new(i as i32 % width, i as i32 / width), index))
        })
    }
}

impl TileLayer for TileMap {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn tile_index(&self, cell: Cell) -> Option<u32> {
        if cell.x < 0 || cell.y < 0 || cell.x >= self.width || cell.y >= self.height {
            return None;
        }
        self.tiles[(cell.y * self.width + cell.x) as usize]
    }
}
