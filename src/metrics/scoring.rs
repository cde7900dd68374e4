//! Feasibility check and full candidate scoring

use crate::board::candidate::MapCandidate;
use crate::io::error::Result;
use crate::math::ratio::mean;
use crate::metrics::stats::{EntityStats, FitnessStats, MapStats};
use crate::metrics::{basic, exploration, fairness, safety, symmetry};
use crate::search::pathfinder::Pathfinder;
use crate::search::reachability::{Reachability, Reachable};

/// Whether a candidate is playable given the fill from its first entity
///
/// Requires at least two players and every entity standing on a reached
/// tile. A candidate without entities is never feasible.
pub fn is_feasible(candidate: &MapCandidate, reachable: &Reachable) -> bool {
    !candidate.entities().is_empty()
        && candidate.player_count() >= 2
        && candidate
            .entities()
            .iter()
            .all(|entity| reachable.contains(entity.position))
}

/// Compute feasibility and every metric group without storing them
///
/// Basic stats need at least one entity. Symmetry, the entity metrics and
/// the combined fitness stay zero unless the candidate is feasible.
///
/// # Errors
///
/// Returns an error if an entity lies off the board
pub fn score(candidate: &MapCandidate) -> Result<(bool, MapStats)> {
    let board = candidate.board();
    let mut stats = MapStats::default();

    let Some(first) = candidate.entities().first() else {
        return Ok((false, stats));
    };

    let occupied = candidate.occupied_cells();
    let reachable = Reachability::new(board, &occupied).fill(first.position);
    let mut pathfinder = Pathfinder::new(board);
    stats.basic = basic::measure(candidate, &reachable, &mut pathfinder)?;

    if !is_feasible(candidate, &reachable) {
        return Ok((false, stats));
    }

    stats.symmetry = symmetry::measure(board);
    let safety = safety::measure(candidate, &reachable, &mut pathfinder)?;
    let exploration = exploration::measure(candidate, &occupied, &mut pathfinder)?;
    stats.entity = EntityStats {
        allocation_fairness: fairness::allocation_fairness(candidate),
        safe_area: safety.area.coverage,
        safe_area_fairness: safety.area.fairness,
        resource_safety: safety.resources.coverage,
        resource_safety_fairness: safety.resources.fairness,
        exploration: exploration.overall,
        exploration_fairness: exploration.fairness,
    };
    stats.fitness = FitnessStats {
        overall_symmetry: stats.symmetry.overall,
        overall_player_fairness: mean([
            stats.entity.safe_area_fairness,
            stats.entity.exploration_fairness,
            stats.entity.resource_safety_fairness,
        ]),
    };

    Ok((true, stats))
}

/// Score a candidate and store the result on it
///
/// # Errors
///
/// Returns an error if an entity lies off the board
pub fn evaluate(candidate: &mut MapCandidate) -> Result<()> {
    let (feasible, stats) = score(candidate)?;
    candidate.apply_scores(feasible, stats);
    Ok(())
}
