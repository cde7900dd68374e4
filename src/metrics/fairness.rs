//! Entity allocation fairness between players

use std::collections::BTreeMap;

use crate::board::candidate::MapCandidate;
use crate::math::ratio::{mean, percent};

/// How evenly each entity type is split between the players, as a percentage
///
/// Per type the score is `total / (max × players)`: 100 when every player
/// holds the same number, lower as one player hoards. The result is the
/// mean over every type owned by at least one player. Neutral entities are
/// ignored, and a candidate without players scores zero.
pub fn allocation_fairness(candidate: &MapCandidate) -> f64 {
    let players: Vec<u32> = candidate.players().collect();
    if players.is_empty() {
        return 0.0;
    }

    // type id -> player id -> count
    let mut allocation: BTreeMap<i32, BTreeMap<u32, usize>> = BTreeMap::new();
    for entity in candidate.entities() {
        if let Some(player) = entity.owner.player() {
            *allocation
                .entry(entity.type_id)
                .or_default()
                .entry(player)
                .or_default() += 1;
        }
    }

    mean(allocation.values().map(|counts| {
        let total: usize = counts.values().sum();
        let max = counts.values().copied().max().unwrap_or(0);
        percent(total, max * players.len())
    }))
}
