//! Tests for fitness axes, pressures and parameter validation

#[cfg(test)]
mod tests {
    use crate::fixtures::{assert_close, map};
    use mapsmith::evolution::params::{
        ArchiveParams, AxisLabels, Direction, FitnessAxis, GaParams, Pressure,
    };
    use mapsmith::io::error::MapError;
    use mapsmith::metrics::MapStats;

    fn scored(symmetry: f64, exploration: f64) -> mapsmith::board::MapCandidate {
        let mut candidate = map(&[".."]);
        let mut stats = MapStats::default();
        stats.fitness.overall_symmetry = symmetry;
        stats.entity.exploration = exploration;
        candidate.apply_scores(true, stats);
        candidate
    }

    // Tests axes read the matching stored metric
    // Verified by reading exploration fairness for exploration
    #[test]
    fn test_axis_values() {
        let candidate = scored(80.0, 25.0);
        assert_close(FitnessAxis::Symmetry.value(&candidate), 80.0);
        assert_close(FitnessAxis::Exploration.value(&candidate), 25.0);
        assert_close(FitnessAxis::PlayerBalance.value(&candidate), 0.0);
        assert_close(FitnessAxis::Exploration.fraction(&candidate), 0.25);
        assert_eq!(FitnessAxis::ALL.len(), 5);
    }

    // Tests fractions clamp into the unit range
    // Verified by removing the clamp
    #[test]
    fn test_fraction_clamps() {
        let candidate = scored(150.0, -10.0);
        assert_close(FitnessAxis::Symmetry.fraction(&candidate), 1.0);
        assert_close(FitnessAxis::Exploration.fraction(&candidate), 0.0);
    }

    // Tests minimising pressure negates the key
    // Verified by returning the raw value for both directions
    #[test]
    fn test_pressure_keys() {
        let candidate = scored(40.0, 0.0);
        assert_close(Pressure::maximise(FitnessAxis::Symmetry).key(&candidate), 40.0);
        assert_close(Pressure::minimise(FitnessAxis::Symmetry).key(&candidate), -40.0);
        assert_eq!(
            Pressure::minimise(FitnessAxis::SafeAreas).direction,
            Direction::Minimise
        );
    }

    // Tests the step schedules
    // Verified by reordering the default schedule
    #[test]
    fn test_schedules() {
        let (x, y) = (FitnessAxis::Symmetry, FitnessAxis::SafeAreas);
        assert_eq!(
            Pressure::default_schedule(x, y),
            vec![
                Pressure::maximise(x),
                Pressure::minimise(x),
                Pressure::minimise(x),
                Pressure::maximise(y),
            ]
        );
        assert_eq!(
            Pressure::four_corners(x, y),
            vec![
                Pressure::maximise(x),
                Pressure::minimise(x),
                Pressure::maximise(y),
                Pressure::minimise(y),
            ]
        );
    }

    // Tests GA defaults and validation
    // Verified by accepting an empty population
    #[test]
    fn test_ga_params_validation() {
        let defaults = GaParams::default();
        assert_eq!(defaults.population_size, 12);
        assert_eq!(defaults.generation_count, 10);
        assert_eq!(defaults.max_initial_mutation, 10);
        assert!(defaults.generate_entities);
        assert!(defaults.validate().is_ok());

        let empty = GaParams {
            population_size: 0,
            ..GaParams::default()
        };
        assert!(matches!(
            empty.validate(),
            Err(MapError::InvalidParameter {
                parameter: "population_size",
                ..
            })
        ));

        let same_axes = GaParams {
            y_axis: FitnessAxis::Symmetry,
            ..GaParams::default()
        };
        assert!(same_axes.validate().is_err());
    }

    // Tests archive defaults, schedule fallback and validation
    // Verified by ignoring an explicit schedule
    #[test]
    fn test_archive_params() {
        let defaults = ArchiveParams::default();
        assert_eq!((defaults.width, defaults.height, defaults.steps), (10, 10, 1));
        let (x, y) = (FitnessAxis::Symmetry, FitnessAxis::PlayerBalance);
        assert_eq!(defaults.schedule_for(x, y), Pressure::default_schedule(x, y));
        assert!(defaults.validate().is_ok());

        let custom = ArchiveParams {
            schedule: Some(vec![Pressure::maximise(y)]),
            ..ArchiveParams::default()
        };
        assert_eq!(custom.schedule_for(x, y), vec![Pressure::maximise(y)]);

        let flat = ArchiveParams {
            height: 0,
            ..ArchiveParams::default()
        };
        assert!(flat.validate().is_err());
        let idle = ArchiveParams {
            schedule: Some(Vec::new()),
            ..ArchiveParams::default()
        };
        assert!(idle.validate().is_err());
    }

    // Tests axis labels
    // Verified by swapping two label fields
    #[test]
    fn test_axis_labels() {
        let labels = AxisLabels::default();
        assert_eq!(labels.label(FitnessAxis::PlayerBalance), "Player Balance");
        assert_eq!(labels.label(FitnessAxis::ResourceSafety), "Resource Safety");
        let renamed = AxisLabels {
            symmetry: "Mirror".to_owned(),
            ..AxisLabels::default()
        };
        assert_eq!(renamed.label(FitnessAxis::Symmetry), "Mirror");
    }
}
