//! Map, tile and unit types.

use serde::Serialize;

use crate::game::rules::{
    BuildingKind, HEIGHT, Landmark, TILE_COUNT, Terrain, UNIT_START_HP, UnitKind, UnitStats,
    WIDTH,
};
use crate::game::FactionId;

/// A coordinate on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Coord {
    /// X coordinate (column).
    pub x: u16,
    /// Y coordinate (row).
    pub y: u16,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Coordinate of a tile index, if the index is on the map.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index >= TILE_COUNT {
            return None;
        }
        let width = WIDTH as usize;
        Some(Self::new((index % width) as u16, (index / width) as u16))
    }

    /// Row-major index of this coordinate, if it is on the map.
    #[must_use]
    pub const fn index(self) -> Option<usize> {
        if self.x < WIDTH && self.y < HEIGHT {
            Some(self.y as usize * WIDTH as usize + self.x as usize)
        } else {
            None
        }
    }

    /// Grid (Manhattan) distance to another coordinate.
    #[must_use]
    pub const fn manhattan(self, other: Coord) -> u16 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Offset this coordinate by a signed step, staying on the map.
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Option<Coord> {
        let x = u16::try_from(i32::from(self.x) + dx).ok()?;
        let y = u16::try_from(i32::from(self.y) + dy).ok()?;
        let coord = Coord::new(x, y);
        coord.index().map(|_| coord)
    }
}

/// A military unit standing on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Unit {
    /// Kind of unit, which fixes its stats.
    pub kind: UnitKind,
    /// Faction that controls the unit.
    pub owner: FactionId,
    /// Remaining hit points. A unit at 0 is removed from play.
    pub hp: u8,
}

impl Unit {
    /// Create a freshly trained unit.
    #[must_use]
    pub const fn new(kind: UnitKind, owner: FactionId) -> Self {
        Self {
            kind,
            owner,
            hp: UNIT_START_HP,
        }
    }

    /// Statistics of this unit's kind.
    #[must_use]
    pub const fn stats(&self) -> UnitStats {
        self.kind.stats()
    }

    /// Check whether the unit has been destroyed.
    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        self.hp == 0
    }
}

/// Something permanently built on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Structure {
    /// A building constructed by a faction.
    Building(BuildingKind),
    /// A capital's landmark.
    Landmark(Landmark),
}

/// A single tile on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tile {
    /// Position of the tile.
    pub coord: Coord,
    /// Type of terrain.
    pub terrain: Terrain,
    /// Permanent structure, if any. Never removed once set.
    pub structure: Option<Structure>,
    /// Owner of this tile (None = unowned).
    pub owner: Option<FactionId>,
    /// Unit standing on the tile, if any.
    pub unit: Option<Unit>,
    /// Whether this tile is one of the two capitals.
    pub is_city: bool,
}

impl Tile {
    /// Create an empty, unowned tile.
    #[must_use]
    pub const fn new(coord: Coord, terrain: Terrain) -> Self {
        Self {
            coord,
            terrain,
            structure: None,
            owner: None,
            unit: None,
            is_city: false,
        }
    }

    /// Regular building on this tile, ignoring landmarks.
    #[must_use]
    pub const fn building(&self) -> Option<BuildingKind> {
        match self.structure {
            Some(Structure::Building(kind)) => Some(kind),
            _ => None,
        }
    }

    /// Landmark on this tile, if it is a capital.
    #[must_use]
    pub const fn landmark(&self) -> Option<Landmark> {
        match self.structure {
            Some(Structure::Landmark(landmark)) => Some(landmark),
            _ => None,
        }
    }
}

/// The game map: a fixed `WIDTH` x `HEIGHT` grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Map {
    /// Tiles stored in row-major order.
    tiles: Vec<Tile>,
}

impl Default for Map {
    fn default() -> Self {
        Self::new()
    }
}

impl Map {
    /// Create a map filled with unowned plains.
    #[must_use]
    pub fn new() -> Self {
        let tiles = (0..TILE_COUNT)
            .filter_map(Coord::from_index)
            .map(|coord| Tile::new(coord, Terrain::Plains))
            .collect();
        Self { tiles }
    }

    /// Get the width of the map.
    #[must_use]
    pub const fn width(&self) -> u16 {
        WIDTH
    }

    /// Get the height of the map.
    #[must_use]
    pub const fn height(&self) -> u16 {
        HEIGHT
    }

    /// Get a reference to the raw tiles slice in row-major order.
    #[must_use]
    #[inline]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Get a reference to the tile at the given index.
    #[must_use]
    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Get a mutable reference to the tile at the given index.
    #[must_use]
    pub fn tile_mut(&mut self, index: usize) -> Option<&mut Tile> {
        self.tiles.get_mut(index)
    }

    /// Get a reference to the tile at the given coordinate.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<&Tile> {
        coord.index().and_then(|idx| self.tiles.get(idx))
    }

    /// Get a mutable reference to the tile at the given coordinate.
    #[must_use]
    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut Tile> {
        coord.index().and_then(|idx| self.tiles.get_mut(idx))
    }

    /// Place a unit on a tile, replacing whatever stood there.
    ///
    /// Returns `false` if the coordinate is out of bounds.
    pub fn place_unit(&mut self, coord: Coord, unit: Unit) -> bool {
        if let Some(tile) = self.get_mut(coord) {
            tile.unit = Some(unit);
            true
        } else {
            false
        }
    }

    /// Get all tiles owned by a specific faction, with their indices.
    pub fn tiles_owned_by(&self, faction: FactionId) -> impl Iterator<Item = (usize, &Tile)> {
        self.tiles
            .iter()
            .enumerate()
            .filter(move |(_, tile)| tile.owner == Some(faction))
    }

    /// Indices of tiles holding a unit of the given faction.
    #[must_use]
    pub fn unit_positions(&self, faction: FactionId) -> Vec<usize> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| tile.unit.is_some_and(|u| u.owner == faction))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Count tiles owned by a faction.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn count_territory(&self, faction: FactionId) -> u32 {
        self.tiles_owned_by(faction).count() as u32
    }

    /// Count units controlled by a faction.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn count_units(&self, faction: FactionId) -> u32 {
        self.unit_positions(faction).len() as u32
    }
}
