//! Tests for tile control, safe areas and resource safety

#[cfg(test)]
mod tests {
    use crate::fixtures::{assert_close, map};
    use mapsmith::board::tile::Coord;
    use mapsmith::metrics::safety::{ControlMap, TileControl, measure};
    use mapsmith::search::{Pathfinder, Reachability};

    // Tests control goes to the strictly closer player with a margin
    // Verified by letting ties go to the lower player id
    #[test]
    fn test_control_and_ties() {
        let candidate = map(&["0...1"]);
        let mut pathfinder = Pathfinder::new(candidate.board());
        let control = ControlMap::build(&candidate, &mut pathfinder).expect("valid entities");

        let near = control.control(Coord::new(1, 0)).expect("player 0 is closer");
        assert_eq!(
            near,
            TileControl {
                player: 0,
                own: 1,
                rival: 3
            }
        );
        assert_close(near.margin(), 0.5);
        assert!(control.control(Coord::new(2, 0)).is_none());
        assert_eq!(control.control(Coord::new(4, 0)).map(|c| c.player), Some(1));
        assert_eq!(control.total_distance(1, Coord::new(0, 0)), Some(4));
        assert_eq!(control.total_distance(7, Coord::new(0, 0)), None);
    }

    // Tests distances of several entities are summed per player
    // Verified by taking the nearest entity instead
    #[test]
    fn test_totals_sum_entities() {
        let candidate = map(&["0.0.1"]);
        let mut pathfinder = Pathfinder::new(candidate.board());
        let control = ControlMap::build(&candidate, &mut pathfinder).expect("valid entities");
        assert_eq!(control.total_distance(0, Coord::new(1, 0)), Some(2));
        assert_eq!(control.total_distance(0, Coord::new(4, 0)), Some(6));
    }

    // Tests unreachable distances count as the cell count
    // Verified by skipping unreachable fields
    #[test]
    fn test_unreachable_distance_cap() {
        let candidate = map(&["0#1"]);
        let mut pathfinder = Pathfinder::new(candidate.board());
        let control = ControlMap::build(&candidate, &mut pathfinder).expect("valid entities");
        assert_eq!(control.total_distance(0, Coord::new(2, 0)), Some(3));
        let held = control.control(Coord::new(0, 0)).expect("player 0 stands here");
        assert_eq!((held.own, held.rival), (0, 3));
        assert_close(held.margin(), 1.0);
    }

    // Tests safe area coverage and fairness on a balanced strip
    // Verified by counting controlled tiles without margins
    #[test]
    fn test_safe_area_balanced() {
        let candidate = map(&["0...1"]);
        let occupied = candidate.occupied_cells();
        let reachable = Reachability::new(candidate.board(), &occupied).fill(Coord::new(0, 0));
        let mut pathfinder = Pathfinder::new(candidate.board());
        let report = measure(&candidate, &reachable, &mut pathfinder).expect("valid entities");
        assert_close(report.area.coverage, 60.0);
        assert_close(report.area.fairness, 100.0);
        assert_close(report.resources.coverage, 0.0);
        assert_close(report.resources.fairness, 100.0);
    }

    // Tests a resource held by one player is half safe and unfair
    // Verified by initialising only controlling players
    #[test]
    fn test_resource_safety_one_sided() {
        let candidate = map(&["0G..1"]);
        let occupied = candidate.occupied_cells();
        let reachable = Reachability::new(candidate.board(), &occupied).fill(Coord::new(0, 0));
        let mut pathfinder = Pathfinder::new(candidate.board());
        let report = measure(&candidate, &reachable, &mut pathfinder).expect("valid entities");
        assert_close(report.resources.coverage, 50.0);
        assert_close(report.resources.fairness, 0.0);
    }

    // Tests a centred resource is contested by both players
    // Verified by treating ties as controlled
    #[test]
    fn test_contested_resource() {
        let candidate = map(&["0.G.1"]);
        let occupied = candidate.occupied_cells();
        let reachable = Reachability::new(candidate.board(), &occupied).fill(Coord::new(0, 0));
        let mut pathfinder = Pathfinder::new(candidate.board());
        let report = measure(&candidate, &reachable, &mut pathfinder).expect("valid entities");
        assert_close(report.resources.coverage, 0.0);
        assert_close(report.resources.fairness, 0.0);
    }
}
