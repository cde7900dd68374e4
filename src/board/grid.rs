//! Fixed-size terrain grid with bounds-checked access
//!
//! Tiles are stored in an `ndarray` matrix indexed `[row, col]`, i.e.
//! `[y, x]` of the board coordinate. Every accessor takes a [`Coord`] and
//! returns `Option`/`Result` instead of panicking on out-of-range input.

use ndarray::Array2;

use crate::board::catalog::TileType;
use crate::board::tile::{Coord, Tile};
use crate::io::error::{MapError, Result, invalid_board};

/// Axis-aligned bounding box with inclusive corners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    /// Minimum corner (inclusive)
    pub min: Coord,
    /// Maximum corner (inclusive)
    pub max: Coord,
}

impl BoundingBox {
    /// Square box of the given half-width centred on `center`
    pub const fn around(center: Coord, half_width: i32) -> Self {
        Self {
            min: Coord::new(center.x - half_width, center.y - half_width),
            max: Coord::new(center.x + half_width, center.y + half_width),
        }
    }

    /// Check if a position is within the bounds
    pub const fn contains(&self, pos: Coord) -> bool {
        pos.x >= self.min.x && pos.x <= self.max.x && pos.y >= self.min.y && pos.y <= self.max.y
    }
}

/// Width × height grid of tiles for one candidate map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    tiles: Array2<Tile>,
}

impl Board {
    /// Create a board where every cell holds a tile of `tile_type`
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or exceeds `i32::MAX`
    pub fn filled(width: usize, height: usize, tile_type: &TileType) -> Result<Self> {
        check_dimensions(width, height)?;
        let tiles = Array2::from_shape_fn((height, width), |(row, col)| {
            tile_type.to_tile(Coord::new(col as i32, row as i32))
        });
        Ok(Self { tiles })
    }

    /// Rebuild a board from a row-major tile list
    ///
    /// Tile positions are rewritten to match their slot in the list.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are invalid or the list length is
    /// not `width × height`
    pub fn from_genome(width: usize, height: usize, genome: Vec<Tile>) -> Result<Self> {
        check_dimensions(width, height)?;
        if genome.len() != width * height {
            return Err(invalid_board(&format!(
                "expected {} tiles for a {width}x{height} board, received {}",
                width * height,
                genome.len()
            )));
        }

        let mut tiles = Array2::from_shape_vec((height, width), genome)
            .map_err(|err| invalid_board(&err))?;
        for ((row, col), tile) in tiles.indexed_iter_mut() {
            tile.position = Coord::new(col as i32, row as i32);
        }
        Ok(Self { tiles })
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.tiles.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.tiles.nrows()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Boards are never empty, dimensions are validated on construction
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Check if a coordinate lies on the board
    pub fn is_in_bounds(&self, pos: Coord) -> bool {
        self.index_of(pos).is_some()
    }

    /// Tile at `pos`, if in bounds
    pub fn get(&self, pos: Coord) -> Option<&Tile> {
        self.index_of(pos).and_then(|index| self.tiles.get(index))
    }

    /// Mutable tile at `pos`, if in bounds
    pub fn get_mut(&mut self, pos: Coord) -> Option<&mut Tile> {
        self.index_of(pos).and_then(|index| self.tiles.get_mut(index))
    }

    /// Replace the tile at `pos`
    ///
    /// The stored tile takes `pos` as its position.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::OutOfBounds`] if `pos` is off the board
    pub fn set(&mut self, pos: Coord, mut tile: Tile) -> Result<()> {
        let dimensions = (self.width(), self.height());
        let slot = self
            .get_mut(pos)
            .ok_or(MapError::OutOfBounds { coord: pos, dimensions })?;
        tile.position = pos;
        *slot = tile;
        Ok(())
    }

    /// Whether the tile at `pos` exists and is walkable
    pub fn is_walkable(&self, pos: Coord) -> bool {
        self.get(pos).is_some_and(|tile| tile.is_walkable)
    }

    /// Number of walkable tiles
    pub fn walkable_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_walkable).count()
    }

    /// Tiles in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Position of every walkable tile in row-major order
    pub fn walkable_positions(&self) -> Vec<Coord> {
        self.tiles
            .iter()
            .filter(|tile| tile.is_walkable)
            .map(|tile| tile.position)
            .collect()
    }

    /// Flat row-major index of `pos`, used for bitset-backed visited sets
    pub fn flat_index(&self, pos: Coord) -> Option<usize> {
        self.index_of(pos).map(|[row, col]| row * self.width() + col)
    }

    /// Coordinate of a flat row-major index
    pub fn coord_of(&self, index: usize) -> Option<Coord> {
        (index < self.len()).then(|| {
            Coord::new((index % self.width()) as i32, (index / self.width()) as i32)
        })
    }

    /// Copy the tiles out as a row-major genome
    pub fn to_genome(&self) -> Vec<Tile> {
        self.tiles.iter().cloned().collect()
    }

    fn index_of(&self, pos: Coord) -> Option<[usize; 2]> {
        let col = usize::try_from(pos.x).ok()?;
        let row = usize::try_from(pos.y).ok()?;
        (col < self.width() && row < self.height()).then_some([row, col])
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(invalid_board(&format!(
            "dimensions must be positive, received {width}x{height}"
        )));
    }
    if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
        return Err(invalid_board(&"dimensions exceed the coordinate range"));
    }
    Ok(())
}
