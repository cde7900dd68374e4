//! Tests for coordinates, owners and neighbour offsets

#[cfg(test)]
mod tests {
    use mapsmith::board::tile::{Coord, Owner};

    // Tests Chebyshev distance takes the larger axis delta
    // Verified by summing the deltas instead
    #[test]
    fn test_chebyshev_distance() {
        let origin = Coord::new(0, 0);
        assert_eq!(origin.chebyshev(Coord::new(3, 1)), 3);
        assert_eq!(origin.chebyshev(Coord::new(-2, 5)), 5);
        assert_eq!(origin.chebyshev(origin), 0);
    }

    // Tests edge neighbours exclude diagonals
    // Verified by swapping in the ring offsets
    #[test]
    fn test_neighbors4_are_edge_sharing() {
        let center = Coord::new(2, 2);
        let neighbors = center.neighbors4();
        assert_eq!(neighbors.len(), 4);
        assert!(neighbors.iter().all(|n| center.chebyshev(*n) == 1));
        assert!(
            neighbors
                .iter()
                .all(|n| (n.x - center.x).abs() + (n.y - center.y).abs() == 1)
        );
    }

    // Tests the ring contains every surrounding cell exactly once
    // Verified by dropping a corner offset
    #[test]
    fn test_neighbors8_cover_ring() {
        let center = Coord::new(0, 0);
        let mut neighbors = center.neighbors8().to_vec();
        neighbors.sort();
        neighbors.dedup();
        assert_eq!(neighbors.len(), 8);
        assert!(!neighbors.contains(&center));
        assert!(neighbors.contains(&Coord::new(-1, -1)));
        assert!(neighbors.contains(&Coord::new(1, 1)));
    }

    // Tests neighbours may step off the board into negative space
    // Verified by using unsigned coordinates
    #[test]
    fn test_offset_allows_negative() {
        assert_eq!(Coord::new(0, 0).offset(-1, -1), Coord::new(-1, -1));
    }

    // Tests owner helpers
    // Verified by swapping the neutral check
    #[test]
    fn test_owner_player_and_neutral() {
        assert_eq!(Owner::Player(3).player(), Some(3));
        assert_eq!(Owner::Neutral.player(), None);
        assert!(Owner::Neutral.is_neutral());
        assert!(!Owner::Player(0).is_neutral());
    }

    // Tests coordinate display format
    // Verified by changing the separator
    #[test]
    fn test_coord_display() {
        assert_eq!(Coord::new(4, -2).to_string(), "(4, -2)");
    }
}
