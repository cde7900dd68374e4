//! Safe areas and resource safety
//!
//! A tile belongs to the player whose entities are, summed together, closest
//! to it. Ties leave the tile uncontrolled. The margin
//! `(rival - own) / (rival + own)` measures how firmly it is held, where
//! `rival` is the best total among the other players. Distances that cannot
//! be walked count as the board's cell count.

use std::collections::{BTreeMap, BTreeSet};

use crate::board::candidate::MapCandidate;
use crate::board::tile::Coord;
use crate::io::error::Result;
use crate::math::ratio::{min_max_ratio, percent};
use crate::search::pathfinder::{DistanceField, Pathfinder};
use crate::search::reachability::Reachable;

/// Controlling player of one tile and the two competing distance totals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileControl {
    /// Player with the strictly smallest distance total
    pub player: u32,
    /// That player's distance total
    pub own: u64,
    /// Best distance total among the other players
    pub rival: u64,
}

impl TileControl {
    /// How firmly the tile is held, in `(0, 1]`
    pub const fn margin(&self) -> f64 {
        let spread = self.rival.saturating_sub(self.own) as f64;
        let total = self.rival.saturating_add(self.own) as f64;
        if total <= 0.0 { 0.0 } else { spread / total }
    }
}

/// Per-player distance fields of every owned entity
pub struct ControlMap {
    players: Vec<(u32, Vec<DistanceField>)>,
    unreachable: u64,
}

impl ControlMap {
    /// Sweep a distance field from every player-owned entity
    ///
    /// # Errors
    ///
    /// Returns an error if an entity lies off the pathfinder's board
    pub fn build(candidate: &MapCandidate, pathfinder: &mut Pathfinder<'_>) -> Result<Self> {
        let mut players = Vec::new();
        for player in candidate.players() {
            let fields = candidate
                .owned_by(player)
                .map(|entity| pathfinder.distance_field(entity.position))
                .collect::<Result<Vec<_>>>()?;
            players.push((player, fields));
        }
        Ok(Self {
            players,
            unreachable: candidate.board().len() as u64,
        })
    }

    /// Sum of distances from `player`'s entities to `pos`
    pub fn total_distance(&self, player: u32, pos: Coord) -> Option<u64> {
        self.players
            .iter()
            .find(|(id, _)| *id == player)
            .map(|(_, fields)| self.sum(fields, pos))
    }

    /// Who controls `pos`, if anyone
    pub fn control(&self, pos: Coord) -> Option<TileControl> {
        let mut totals: Vec<(u64, u32)> = self
            .players
            .iter()
            .map(|(player, fields)| (self.sum(fields, pos), *player))
            .collect();
        totals.sort_unstable();

        let [(own, player), (rival, _), ..] = totals.as_slice() else {
            return None;
        };
        (own < rival).then_some(TileControl {
            player: *player,
            own: *own,
            rival: *rival,
        })
    }

    fn sum(&self, fields: &[DistanceField], pos: Coord) -> u64 {
        fields
            .iter()
            .map(|field| field.get(pos).map_or(self.unreachable, u64::from))
            .sum()
    }
}

/// Coverage and fairness of one kind of controlled territory
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Territory {
    /// Margin-weighted share of the tiles that someone controls, as a percentage
    pub coverage: f64,
    /// Weakest player's margin sum relative to the strongest's, as a percentage
    pub fairness: f64,
}

/// Safe-area and resource territories of one candidate
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SafetyReport {
    /// Territory over every reachable tile
    pub area: Territory,
    /// Territory over reachable resource tiles
    pub resources: Territory,
}

/// Score the safe areas and resource safety of a feasible candidate
///
/// `reachable` is the flood fill used for feasibility. A map without
/// resources has no resource safety, and no player is disadvantaged, so its
/// resource fairness is 100.
///
/// # Errors
///
/// Returns an error if an entity lies off the pathfinder's board
pub fn measure(
    candidate: &MapCandidate,
    reachable: &Reachable,
    pathfinder: &mut Pathfinder<'_>,
) -> Result<SafetyReport> {
    let control = ControlMap::build(candidate, pathfinder)?;
    let area = territory(candidate, &control, &reachable.tiles);

    let resource_cells: BTreeSet<Coord> = candidate
        .neutral_entities()
        .map(|entity| entity.position)
        .filter(|pos| reachable.contains(*pos))
        .collect();
    let resources = if resource_cells.is_empty() {
        Territory {
            coverage: 0.0,
            fairness: 100.0,
        }
    } else {
        territory(candidate, &control, &resource_cells)
    };

    Ok(SafetyReport { area, resources })
}

fn territory(candidate: &MapCandidate, control: &ControlMap, cells: &BTreeSet<Coord>) -> Territory {
    let mut held: BTreeMap<u32, f64> = candidate.players().map(|player| (player, 0.0)).collect();
    let mut total = 0.0;
    for &cell in cells {
        if let Some(tile) = control.control(cell) {
            let margin = tile.margin();
            total += margin;
            if let Some(sum) = held.get_mut(&tile.player) {
                *sum += margin;
            }
        }
    }

    Territory {
        coverage: percent(total, cells.len()),
        fairness: min_max_ratio(held.values().copied()),
    }
}
