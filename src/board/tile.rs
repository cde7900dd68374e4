//! Cell coordinates, terrain tiles, owners and entities

use std::fmt;

/// Grid cell coordinate in board space
///
/// Signed so that neighbour offsets can step off the board and be rejected
/// by bounds checks instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Coord {
    /// Column index
    pub x: i32,
    /// Row index
    pub y: i32,
}

/// Offsets of the four edge-sharing neighbours
const EDGE_OFFSETS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Offsets of all eight surrounding neighbours
const RING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

impl Coord {
    /// Create a coordinate from column and row
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Coordinate shifted by the given offset
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Chebyshev distance, the step count on an open 8-connected grid
    pub const fn chebyshev(self, other: Self) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        if dx > dy { dx } else { dy }
    }

    /// The four edge-sharing neighbours
    pub fn neighbors4(self) -> [Self; 4] {
        EDGE_OFFSETS.map(|(dx, dy)| self.offset(dx, dy))
    }

    /// All eight surrounding neighbours
    pub fn neighbors8(self) -> [Self; 8] {
        RING_OFFSETS.map(|(dx, dy)| self.offset(dx, dy))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Static terrain data of one grid cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// Catalog id of the tile type
    pub type_id: i32,
    /// Whether units can stand on and cross this tile
    pub is_walkable: bool,
    /// Whether this tile obstructs line of sight
    pub blocks_sight: bool,
    /// Locked tiles are never touched by mutation or crossover
    pub locked: bool,
    /// Cell this tile occupies
    pub position: Coord,
}

/// Who controls an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Owner {
    /// Unowned, e.g. a resource
    Neutral,
    /// Controlled by the player with this id
    Player(u32),
}

impl Owner {
    /// Player id, or `None` for neutral entities
    pub const fn player(self) -> Option<u32> {
        match self {
            Self::Player(id) => Some(id),
            Self::Neutral => None,
        }
    }

    /// Whether the entity is unowned
    pub const fn is_neutral(self) -> bool {
        matches!(self, Self::Neutral)
    }
}

/// A unit, building or resource placed on the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    /// Identifier unique within one candidate
    pub id: u32,
    /// Catalog id of the entity type
    pub type_id: i32,
    /// Controlling player, if any
    pub owner: Owner,
    /// Cell the entity stands on
    pub position: Coord,
}
