//! Tests for exploration coverage and fairness

#[cfg(test)]
mod tests {
    use crate::fixtures::{assert_close, map};
    use mapsmith::metrics::exploration::measure;
    use mapsmith::search::Pathfinder;

    // Tests a straight strip is crossed completely by both players
    // Verified by counting only the final fill
    #[test]
    fn test_strip_fully_explored() {
        let candidate = map(&["0...1"]);
        let mut pathfinder = Pathfinder::new(candidate.board());
        let report = measure(&candidate, &candidate.occupied_cells(), &mut pathfinder)
            .expect("valid entities");
        assert_close(report.per_player.get(&0).copied().unwrap_or_default(), 5.0);
        assert_close(report.per_player.get(&1).copied().unwrap_or_default(), 5.0);
        assert_close(report.overall, 100.0);
        assert_close(report.fairness, 100.0);
    }

    // Tests the fill order makes one player cross more ground
    // Verified by stopping before expanding the frontier
    #[test]
    fn test_uneven_exploration() {
        let candidate = map(&["0.1..."]);
        let mut pathfinder = Pathfinder::new(candidate.board());
        let report = measure(&candidate, &candidate.occupied_cells(), &mut pathfinder)
            .expect("valid entities");
        assert_close(report.per_player.get(&0).copied().unwrap_or_default(), 3.0);
        assert_close(report.per_player.get(&1).copied().unwrap_or_default(), 4.0);
        assert_close(report.overall, 350.0 / 6.0);
        assert_close(report.fairness, 75.0);
    }

    // Tests a lone player explores nothing
    // Verified by treating the player as its own rival
    #[test]
    fn test_single_player() {
        let candidate = map(&["0.0"]);
        let mut pathfinder = Pathfinder::new(candidate.board());
        let report = measure(&candidate, &candidate.occupied_cells(), &mut pathfinder)
            .expect("valid entities");
        assert_close(report.per_player.get(&0).copied().unwrap_or_default(), 0.0);
        assert_close(report.overall, 0.0);
        assert_close(report.fairness, 0.0);
    }
}
