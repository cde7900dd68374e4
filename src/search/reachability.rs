//! Flood fills over walkable terrain

use std::collections::{BTreeSet, VecDeque};

use bitvec::prelude::*;

use crate::board::grid::{Board, BoundingBox};
use crate::board::tile::Coord;
use crate::io::configuration::EXPLORATION_BOX_MARGIN;

/// Cells reached by one fill
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reachable {
    /// Walkable tiles visited, including the start
    pub tiles: BTreeSet<Coord>,
    /// Visited tiles that hold an entity
    pub entities: BTreeSet<Coord>,
}

impl Reachable {
    /// Whether `pos` was visited
    pub fn contains(&self, pos: Coord) -> bool {
        self.tiles.contains(&pos)
    }
}

/// Flood-fill engine over one board and its occupied cells
pub struct Reachability<'a> {
    board: &'a Board,
    occupied: &'a BTreeSet<Coord>,
}

#[derive(Clone, Copy)]
enum Connectivity {
    Edges,
    Ring,
}

struct Limits {
    bounds: BoundingBox,
    target: Coord,
}

impl<'a> Reachability<'a> {
    /// Bind a board and the cells holding entities
    pub const fn new(board: &'a Board, occupied: &'a BTreeSet<Coord>) -> Self {
        Self { board, occupied }
    }

    /// Every walkable tile 4-connected to `start`
    ///
    /// A start off the board or on blocked terrain reaches nothing.
    pub fn fill(&self, start: Coord) -> Reachable {
        self.traverse(start, Connectivity::Edges, None)
    }

    /// Tiles crossed while spreading from `start` towards `target`
    ///
    /// The fill is 8-connected, stops as soon as `target` is reached and
    /// never leaves a square around `start` whose half-width is
    /// `path_length` plus a small margin.
    pub fn fill_towards(&self, start: Coord, target: Coord, path_length: u32) -> Reachable {
        let half_width = i32::try_from(path_length)
            .unwrap_or(i32::MAX - EXPLORATION_BOX_MARGIN)
            .saturating_add(EXPLORATION_BOX_MARGIN);
        let limits = Limits {
            bounds: BoundingBox::around(start, half_width),
            target,
        };
        self.traverse(start, Connectivity::Ring, Some(&limits))
    }

    fn traverse(
        &self,
        start: Coord,
        connectivity: Connectivity,
        limits: Option<&Limits>,
    ) -> Reachable {
        let mut reached = Reachable::default();
        let Some(start_index) = self.board.flat_index(start) else {
            return reached;
        };
        if !self.board.is_walkable(start) {
            return reached;
        }

        let mut visited = bitvec![0; self.board.len()];
        visited.set(start_index, true);
        self.visit(start, &mut reached);
        if limits.is_some_and(|limit| limit.target == start) {
            return reached;
        }

        let mut frontier = VecDeque::from([start]);
        while let Some(current) = frontier.pop_front() {
            let neighbours: &[Coord] = match connectivity {
                Connectivity::Edges => &current.neighbors4(),
                Connectivity::Ring => &current.neighbors8(),
            };

            for &next in neighbours {
                if limits.is_some_and(|limit| !limit.bounds.contains(next)) {
                    continue;
                }
                let Some(index) = self.board.flat_index(next) else {
                    continue;
                };
                if visited.get(index).as_deref() == Some(&true) || !self.board.is_walkable(next)
                {
                    continue;
                }

                visited.set(index, true);
                self.visit(next, &mut reached);
                if limits.is_some_and(|limit| limit.target == next) {
                    return reached;
                }
                frontier.push_back(next);
            }
        }

        reached
    }

    fn visit(&self, pos: Coord, reached: &mut Reachable) {
        reached.tiles.insert(pos);
        if self.occupied.contains(&pos) {
            reached.entities.insert(pos);
        }
    }
}
