//! Exploration: the ground each player crosses on the way to its rivals

use std::collections::{BTreeMap, BTreeSet};

use crate::board::candidate::MapCandidate;
use crate::board::tile::Coord;
use crate::io::error::Result;
use crate::math::ratio::{mean, min_max_ratio, percent};
use crate::search::pathfinder::Pathfinder;
use crate::search::reachability::Reachability;

/// Exploration coverage and fairness of one candidate
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExplorationReport {
    /// Mean tiles crossed per owned entity, per player
    pub per_player: BTreeMap<u32, f64>,
    /// Mean over players relative to the walkable tile count, as a percentage
    pub overall: f64,
    /// Weakest player's exploration relative to the strongest's, as a percentage
    pub fairness: f64,
}

/// Flood towards every rival from every owned entity and measure the spread
///
/// Each fill is boxed by the A* distance to the rival it heads for, so a
/// player whose rivals are far away has to cross more ground.
///
/// # Errors
///
/// Returns an error if an entity lies off the pathfinder's board
pub fn measure(
    candidate: &MapCandidate,
    occupied: &BTreeSet<Coord>,
    pathfinder: &mut Pathfinder<'_>,
) -> Result<ExplorationReport> {
    let board = candidate.board();
    let reachability = Reachability::new(board, occupied);
    let unreachable = board.len() as u32;

    let mut per_player = BTreeMap::new();
    for player in candidate.players() {
        let mut crossed_per_entity = Vec::new();
        for own in candidate.owned_by(player) {
            let mut crossed = BTreeSet::new();
            for rival in candidate.rivals_of(player) {
                let path = pathfinder
                    .path_length(own.position, rival.position)?
                    .length_or(unreachable);
                let fill = reachability.fill_towards(own.position, rival.position, path);
                crossed.extend(fill.tiles);
            }
            crossed_per_entity.push(crossed.len());
        }
        per_player.insert(player, mean(crossed_per_entity));
    }

    let overall = percent(mean(per_player.values().copied()), board.walkable_count());
    let fairness = min_max_ratio(per_player.values().copied());
    Ok(ExplorationReport {
        per_player,
        overall,
        fairness,
    })
}
