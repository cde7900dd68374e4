//! Walkability symmetry under the four board reflections
//!
//! Each axis compares every cell with its mirror image and reports the share
//! of cells whose walkability matches. Cells on the mirror line map onto
//! themselves and always match. On non-square boards the diagonal mirrors
//! scale each coordinate into the other dimension's range and round to the
//! nearest cell.

use crate::board::grid::Board;
use crate::board::tile::Coord;
use crate::math::ratio::{mean, percent};
use crate::metrics::stats::SymmetryStats;

/// Board reflection used for a symmetry check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reflection {
    /// Flip top to bottom
    Horizontal,
    /// Flip left to right
    Vertical,
    /// Mirror across the top-left to bottom-right diagonal
    MainDiagonal,
    /// Mirror across the top-right to bottom-left diagonal
    AntiDiagonal,
}

impl Reflection {
    /// All reflections in reporting order
    pub const ALL: [Self; 4] = [
        Self::Horizontal,
        Self::Vertical,
        Self::MainDiagonal,
        Self::AntiDiagonal,
    ];

    /// Mirror image of `pos` on a board of the given size
    pub fn mirror(self, pos: Coord, width: usize, height: usize) -> Coord {
        let last_x = width.saturating_sub(1) as i32;
        let last_y = height.saturating_sub(1) as i32;
        match self {
            Self::Horizontal => Coord::new(pos.x, last_y - pos.y),
            Self::Vertical => Coord::new(last_x - pos.x, pos.y),
            Self::MainDiagonal => {
                Coord::new(rescale(pos.y, last_y, last_x), rescale(pos.x, last_x, last_y))
            }
            Self::AntiDiagonal => Coord::new(
                last_x - rescale(pos.y, last_y, last_x),
                last_y - rescale(pos.x, last_x, last_y),
            ),
        }
    }
}

/// Map `value` from `0..=from` onto `0..=to`, rounding to the nearest step
fn rescale(value: i32, from: i32, to: i32) -> i32 {
    if from == 0 || to == 0 {
        return 0;
    }
    if from == to {
        return value;
    }
    (f64::from(value) * f64::from(to) / f64::from(from)).round() as i32
}

/// Percentage of cells whose walkability matches their mirror image
pub fn axis_symmetry(board: &Board, reflection: Reflection) -> f64 {
    let (width, height) = (board.width(), board.height());
    let matches = board
        .tiles()
        .filter(|tile| {
            let mirrored = reflection.mirror(tile.position, width, height);
            board
                .get(mirrored)
                .is_some_and(|other| other.is_walkable == tile.is_walkable)
        })
        .count();
    percent(matches, board.len())
}

/// Symmetry along every axis plus their mean
pub fn measure(board: &Board) -> SymmetryStats {
    let [horizontal, vertical, main_diagonal, anti_diagonal] =
        Reflection::ALL.map(|reflection| axis_symmetry(board, reflection));
    SymmetryStats {
        horizontal,
        vertical,
        main_diagonal,
        anti_diagonal,
        overall: mean([horizontal, vertical, main_diagonal, anti_diagonal]),
    }
}
