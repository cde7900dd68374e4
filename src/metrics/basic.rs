//! Layout counts and base distances

use crate::board::candidate::MapCandidate;
use crate::io::error::Result;
use crate::math::ratio::mean;
use crate::metrics::stats::BasicStats;
use crate::search::pathfinder::Pathfinder;
use crate::search::reachability::Reachable;

/// Resource count, used space, entities per player and base distances
///
/// Base distances are A* lengths between every pair of entities owned by
/// different players. Pairs with no path are left out; with no connected
/// pair all three distances are zero.
///
/// # Errors
///
/// Returns an error if an entity lies off the pathfinder's board
pub fn measure(
    candidate: &MapCandidate,
    reachable: &Reachable,
    pathfinder: &mut Pathfinder<'_>,
) -> Result<BasicStats> {
    let owned_entities = candidate
        .players()
        .map(|player| (player, candidate.owned_by(player).count()))
        .collect();

    let mut distances = Vec::new();
    let entities = candidate.entities();
    for (index, first) in entities.iter().enumerate() {
        let Some(first_player) = first.owner.player() else {
            continue;
        };
        for second in entities.iter().skip(index + 1) {
            let Some(second_player) = second.owner.player() else {
                continue;
            };
            if first_player == second_player {
                continue;
            }
            if let Some(length) = pathfinder
                .path_length(first.position, second.position)?
                .length()
            {
                distances.push(length);
            }
        }
    }

    Ok(BasicStats {
        available_resources: candidate.neutral_entities().count(),
        used_space: reachable.tiles.len(),
        owned_entities,
        min_base_distance: distances.iter().copied().min().unwrap_or(0),
        average_base_distance: mean(distances.iter().copied()),
        max_base_distance: distances.iter().copied().max().unwrap_or(0),
    })
}
