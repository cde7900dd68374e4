//! A* shortest-path oracle over the 8-connected walkable grid
//!
//! Every step costs 1 and the heuristic is the Chebyshev distance, which is
//! admissible and consistent for uniform-cost 8-connected grids, so the first
//! time the destination leaves the open set its cost is optimal.
//!
//! Search buffers live in the [`Pathfinder`] and are reset on every query,
//! so repeated queries allocate nothing after the first and can never see
//! state left behind by an earlier one.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use bitvec::prelude::*;

use crate::board::grid::Board;
use crate::board::tile::Coord;
use crate::io::error::{MapError, Result};

const NO_PARENT: usize = usize::MAX;

/// Outcome of a shortest-path query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathResult {
    /// A path exists with this many steps
    Found(u32),
    /// No walkable route connects the endpoints
    Unreachable,
}

impl PathResult {
    /// Step count, if a path exists
    pub const fn length(self) -> Option<u32> {
        match self {
            Self::Found(length) => Some(length),
            Self::Unreachable => None,
        }
    }

    /// Step count, with unreachable endpoints reported as `cap`
    pub const fn length_or(self, cap: u32) -> u32 {
        match self {
            Self::Found(length) => length,
            Self::Unreachable => cap,
        }
    }
}

/// Step distances from one source to every cell of a board
#[derive(Debug, Clone)]
pub struct DistanceField {
    width: usize,
    height: usize,
    distances: Vec<Option<u32>>,
}

impl DistanceField {
    /// Distance to `pos`, or `None` when unreachable or off the board
    pub fn get(&self, pos: Coord) -> Option<u32> {
        let col = usize::try_from(pos.x).ok()?;
        let row = usize::try_from(pos.y).ok()?;
        if col >= self.width || row >= self.height {
            return None;
        }
        self.distances.get(row * self.width + col).copied().flatten()
    }
}

/// Reusable A* search state bound to one board
pub struct Pathfinder<'a> {
    board: &'a Board,
    closed: BitVec,
    g_cost: Vec<u32>,
    parent: Vec<usize>,
    open: BinaryHeap<Reverse<(u32, u32, usize)>>,
}

impl<'a> Pathfinder<'a> {
    /// Allocate search buffers sized to `board`
    pub fn new(board: &'a Board) -> Self {
        let cells = board.len();
        Self {
            board,
            closed: bitvec![0; cells],
            g_cost: vec![u32::MAX; cells],
            parent: vec![NO_PARENT; cells],
            open: BinaryHeap::new(),
        }
    }

    /// The board this pathfinder searches
    pub const fn board(&self) -> &'a Board {
        self.board
    }

    /// Shortest path length from `src` to `dest`
    ///
    /// Identical endpoints give `Found(0)`. A blocked endpoint or an
    /// exhausted search gives `Unreachable`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::OutOfBounds`] if either endpoint is off the board
    pub fn path_length(&mut self, src: Coord, dest: Coord) -> Result<PathResult> {
        let src_index = self.index_or_error(src)?;
        let dest_index = self.index_or_error(dest)?;

        if src == dest {
            return Ok(PathResult::Found(0));
        }
        if !self.board.is_walkable(src) || !self.board.is_walkable(dest) {
            return Ok(PathResult::Unreachable);
        }

        self.reset();
        self.record(src_index, 0, src_index);
        let h_start = src.chebyshev(dest);
        self.open.push(Reverse((h_start, h_start, src_index)));

        while let Some(Reverse((_, _, current))) = self.open.pop() {
            if self.is_closed(current) {
                continue;
            }
            self.closed.set(current, true);

            if current == dest_index {
                return Ok(PathResult::Found(self.trace(src_index, dest_index)));
            }

            let Some(coord) = self.board.coord_of(current) else {
                continue;
            };
            let g_current = self.g_cost.get(current).copied().unwrap_or(u32::MAX);

            for neighbour in coord.neighbors8() {
                let Some(next) = self.board.flat_index(neighbour) else {
                    continue;
                };
                if self.is_closed(next) || !self.board.is_walkable(neighbour) {
                    continue;
                }

                let g_new = g_current.saturating_add(1);
                if g_new < self.g_cost.get(next).copied().unwrap_or(u32::MAX) {
                    self.record(next, g_new, current);
                    let h = neighbour.chebyshev(dest);
                    self.open.push(Reverse((g_new.saturating_add(h), h, next)));
                }
            }
        }

        Ok(PathResult::Unreachable)
    }

    /// Step distance from `source` to every cell in one sweep
    ///
    /// Yields the same lengths as one [`Self::path_length`] query per cell.
    /// A non-walkable source reaches nothing.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::OutOfBounds`] if `source` is off the board
    pub fn distance_field(&mut self, source: Coord) -> Result<DistanceField> {
        let source_index = self.index_or_error(source)?;
        let mut distances = vec![None; self.board.len()];

        if self.board.is_walkable(source) {
            self.reset();
            self.closed.set(source_index, true);
            if let Some(slot) = distances.get_mut(source_index) {
                *slot = Some(0);
            }

            let mut frontier = VecDeque::from([(source, 0_u32)]);
            while let Some((coord, distance)) = frontier.pop_front() {
                for neighbour in coord.neighbors8() {
                    let Some(next) = self.board.flat_index(neighbour) else {
                        continue;
                    };
                    if self.is_closed(next) || !self.board.is_walkable(neighbour) {
                        continue;
                    }
                    self.closed.set(next, true);
                    if let Some(slot) = distances.get_mut(next) {
                        *slot = Some(distance + 1);
                    }
                    frontier.push_back((neighbour, distance + 1));
                }
            }
        }

        Ok(DistanceField {
            width: self.board.width(),
            height: self.board.height(),
            distances,
        })
    }

    fn reset(&mut self) {
        self.closed.fill(false);
        self.g_cost.fill(u32::MAX);
        self.parent.fill(NO_PARENT);
        self.open.clear();
    }

    fn record(&mut self, index: usize, cost: u32, parent: usize) {
        if let Some(slot) = self.g_cost.get_mut(index) {
            *slot = cost;
        }
        if let Some(slot) = self.parent.get_mut(index) {
            *slot = parent;
        }
    }

    fn is_closed(&self, index: usize) -> bool {
        self.closed.get(index).as_deref() == Some(&true)
    }

    /// Count steps by walking parent pointers back from the destination
    fn trace(&self, src_index: usize, dest_index: usize) -> u32 {
        let mut steps = 0;
        let mut current = dest_index;
        // A path never revisits a cell, so the walk is bounded by the board size
        for _ in 0..self.parent.len() {
            if current == src_index {
                break;
            }
            match self.parent.get(current).copied() {
                Some(parent) if parent != NO_PARENT => {
                    current = parent;
                    steps += 1;
                }
                _ => break,
            }
        }
        steps
    }

    fn index_or_error(&self, pos: Coord) -> Result<usize> {
        self.board
            .flat_index(pos)
            .ok_or(MapError::OutOfBounds {
                coord: pos,
                dimensions: (self.board.width(), self.board.height()),
            })
    }
}
