//! Tile grid, named points of interest and ship coordinates.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::constants::{
    BREEDING_GROUND_POSITIONS, ISLAND_POSITIONS, WAYSTATION_POSITIONS, WORLD_HEIGHT, WORLD_WIDTH,
};

/// Terrain classification of a single tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    #[default]
    Empty,
    Island,
    Waystation,
    Storm,
    BreedingGround,
}

impl TileKind {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Island => "island",
            Self::Waystation => "waystation",
            Self::Storm => "storm",
            Self::BreedingGround => "breeding_ground",
        }
    }
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    pub x: i32,
    pub y: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Tile {
    #[must_use]
    pub const fn new(x: i32, y: i32, kind: TileKind) -> Self {
        Self {
            kind,
            x,
            y,
            name: None,
        }
    }

    #[must_use]
    pub fn named(x: i32, y: i32, kind: TileKind, name: &str) -> Self {
        Self {
            kind,
            x,
            y,
            name: Some(name.to_string()),
        }
    }
}

/// Canonical map key for a coordinate pair.
///
/// The comma separator cannot appear inside a formatted integer, so distinct
/// pairs never produce the same key.
#[must_use]
pub fn tile_key(x: i32, y: i32) -> String {
    format!("{x},{y}")
}

/// Ship or tile coordinate. Not bounds-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// One tile in `direction`. Up decreases `y`.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::new(self.x, self.y.saturating_sub(1)),
            Direction::Down => Self::new(self.x, self.y.saturating_add(1)),
            Direction::Left => Self::new(self.x.saturating_sub(1), self.y),
            Direction::Right => Self::new(self.x.saturating_add(1), self.y),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Fixed-size tile grid.
///
/// Exactly one tile exists for every coordinate inside the bounds; lookups
/// outside the bounds return `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct World {
    pub width: i32,
    pub height: i32,
    tiles: BTreeMap<String, Tile>,
}

impl World {
    /// Build the standard map: an empty grid with the hardcoded islands,
    /// waystations and breeding grounds placed where they fit.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        let mut world = Self::blank(width, height);
        for (x, y) in ISLAND_POSITIONS {
            world.place(Tile::new(x, y, TileKind::Island));
        }
        for (x, y, name) in WAYSTATION_POSITIONS {
            world.place(Tile::named(x, y, TileKind::Waystation, name));
        }
        for (x, y, name) in BREEDING_GROUND_POSITIONS {
            world.place(Tile::named(x, y, TileKind::BreedingGround, name));
        }
        world
    }

    /// Grid of empty tiles. Non-positive dimensions produce an empty world.
    #[must_use]
    pub fn blank(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let mut tiles = BTreeMap::new();
        for y in 0..height {
            for x in 0..width {
                tiles.insert(tile_key(x, y), Tile::new(x, y, TileKind::Empty));
            }
        }
        Self {
            width,
            height,
            tiles,
        }
    }

    fn place(&mut self, tile: Tile) {
        if self.contains(tile.x, tile.y) {
            self.tiles.insert(tile_key(tile.x, tile.y), tile);
        }
    }

    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    #[must_use]
    pub fn get_tile(&self, x: i32, y: i32) -> Option<&Tile> {
        if !self.contains(x, y) {
            return None;
        }
        self.tiles.get(&tile_key(x, y))
    }

    #[must_use]
    pub fn tile_at(&self, position: Position) -> Option<&Tile> {
        self.get_tile(position.x, position.y)
    }

    #[must_use]
    pub fn is_breeding_ground(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y)
            .is_some_and(|tile| tile.kind == TileKind::BreedingGround)
    }

    /// Overwrite a tile's kind, dropping any name. Scenario setup only;
    /// ignored outside the bounds.
    pub fn set_tile(&mut self, x: i32, y: i32, kind: TileKind) {
        self.place(Tile::new(x, y, kind));
    }

    /// Nearest in-bounds position. Returns the input for an empty world.
    #[must_use]
    pub fn clamp(&self, position: Position) -> Position {
        if self.width == 0 || self.height == 0 {
            return position;
        }
        Position::new(
            position.x.clamp(0, self.width - 1),
            position.y.clamp(0, self.height - 1),
        )
    }

    /// Every tile of `kind`, row-major.
    #[must_use]
    pub fn tiles_of_kind(&self, kind: TileKind) -> Vec<&Tile> {
        let mut tiles: Vec<&Tile> = self.tiles.values().filter(|t| t.kind == kind).collect();
        tiles.sort_by_key(|t| (t.y, t.x));
        tiles
    }

    /// Named tiles, row-major.
    #[must_use]
    pub fn named_locations(&self) -> Vec<&Tile> {
        let mut tiles: Vec<&Tile> = self.tiles.values().filter(|t| t.name.is_some()).collect();
        tiles.sort_by_key(|t| (t.y, t.x));
        tiles
    }

    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(WORLD_WIDTH, WORLD_HEIGHT)
    }
}

/// Standard world with the default dimensions.
#[must_use]
pub fn create_world() -> World {
    World::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_world_has_one_tile_per_cell() {
        let world = create_world();
        assert_eq!(world.width, 20);
        assert_eq!(world.height, 15);
        assert_eq!(world.tile_count(), 300);
        for y in 0..world.height {
            for x in 0..world.width {
                let tile = world.get_tile(x, y).expect("in-bounds tile");
                assert_eq!((tile.x, tile.y), (x, y));
            }
        }
    }

    #[test]
    fn out_of_bounds_lookups_are_none() {
        let world = create_world();
        assert!(world.get_tile(-1, 0).is_none());
        assert!(world.get_tile(0, -1).is_none());
        assert!(world.get_tile(20, 0).is_none());
        assert!(world.get_tile(0, 15).is_none());
        assert!(!world.is_breeding_ground(99, 99));
    }

    #[test]
    fn points_of_interest_are_placed() {
        let world = create_world();
        assert_eq!(world.get_tile(5, 5).map(|t| t.kind), Some(TileKind::Island));
        assert!(world.get_tile(5, 5).and_then(|t| t.name.as_ref()).is_none());

        let waystation = world.get_tile(7, 7).unwrap();
        assert_eq!(waystation.kind, TileKind::Waystation);
        assert_eq!(waystation.name.as_deref(), Some("Circuit Waystation"));

        assert!(world.is_breeding_ground(2, 10));
        assert!(world.is_breeding_ground(16, 8));
        assert!(world.is_breeding_ground(9, 2));
        assert!(!world.is_breeding_ground(0, 0));
        assert_eq!(world.tiles_of_kind(TileKind::BreedingGround).len(), 3);
        assert_eq!(world.named_locations().len(), 5);
    }

    #[test]
    fn small_worlds_skip_out_of_range_points() {
        let world = World::new(6, 6);
        assert_eq!(world.tile_count(), 36);
        assert_eq!(world.get_tile(5, 5).map(|t| t.kind), Some(TileKind::Island));
        assert!(world.tiles_of_kind(TileKind::BreedingGround).is_empty());
        assert!(world.tiles_of_kind(TileKind::Waystation).is_empty());
    }

    #[test]
    fn set_tile_overwrites_kind_and_drops_name() {
        let mut world = create_world();
        world.set_tile(7, 7, TileKind::Storm);
        let tile = world.get_tile(7, 7).unwrap();
        assert_eq!(tile.kind, TileKind::Storm);
        assert!(tile.name.is_none());

        world.set_tile(40, 40, TileKind::Island);
        assert_eq!(world.tile_count(), 300);
        assert!(world.get_tile(40, 40).is_none());
    }

    #[test]
    fn keys_are_canonical_and_distinct() {
        assert_eq!(tile_key(3, 4), tile_key(3, 4));
        assert_ne!(tile_key(1, 23), tile_key(12, 3));
        assert_ne!(tile_key(-1, 2), tile_key(1, -2));
    }

    #[test]
    fn clamp_keeps_positions_on_grid() {
        let world = create_world();
        assert_eq!(world.clamp(Position::new(-3, 40)), Position::new(0, 14));
        assert_eq!(world.clamp(Position::new(25, 7)), Position::new(19, 7));
        let empty = World::blank(0, 0);
        assert_eq!(empty.clamp(Position::new(4, 4)), Position::new(4, 4));
    }

    #[test]
    fn steps_follow_screen_axes() {
        let origin = Position::new(3, 3);
        assert_eq!(origin.step(Direction::Up), Position::new(3, 2));
        assert_eq!(origin.step(Direction::Down), Position::new(3, 4));
        assert_eq!(origin.step(Direction::Left), Position::new(2, 3));
        assert_eq!(origin.step(Direction::Right), Position::new(4, 3));
    }
}
