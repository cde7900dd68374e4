//! Tests for argument parsing and end-to-end search sessions

#[cfg(test)]
mod tests {
    use crate::fixtures::{CATALOG_JSON, dump};
    use clap::Parser;
    use mapsmith::evolution::params::{FitnessAxis, MutationPolicy, Pressure};
    use mapsmith::io::cli::{Cli, Mode, Session, init_tracing};
    use mapsmith::io::configuration::{DEFAULT_POPULATION_SIZE, DEFAULT_SEED};
    use std::path::{Path, PathBuf};

    fn arg(path: &Path) -> String {
        path.to_string_lossy().into_owned()
    }

    fn write_inputs(dir: &Path) -> (String, String) {
        let catalog = dir.join("types.json");
        let seed = dir.join("duel.txt");
        std::fs::write(&catalog, CATALOG_JSON).expect("writable");
        std::fs::write(&seed, dump(&["0....", ".#.#.", "..G..", ".#.#.", "....1"]))
            .expect("writable");
        (arg(&catalog), arg(&seed))
    }

    // Tests parsing with only the positional arguments
    // Verified by changing the default mode
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["mapsmith", "types.json", "seed.txt"]);
        assert_eq!(cli.catalog, PathBuf::from("types.json"));
        assert_eq!(cli.seed_map, PathBuf::from("seed.txt"));
        assert_eq!(cli.output, PathBuf::from("maps"));
        assert_eq!(cli.mode, Mode::Elites);
        assert_eq!(cli.seed, DEFAULT_SEED);
        assert_eq!(cli.population, DEFAULT_POPULATION_SIZE);
        assert!(cli.should_show_progress());
        assert!(cli.archive_params().schedule.is_none());
    }

    // Tests every flag reaches the search parameters
    // Verified by ignoring the terrain-only flag
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "mapsmith",
            "types.json",
            "seed.txt",
            "-o",
            "out",
            "--mode",
            "evolve",
            "-s",
            "7",
            "-p",
            "20",
            "-g",
            "3",
            "-m",
            "2",
            "-x",
            "safe-areas",
            "-y",
            "resource-safety",
            "--mutation-policy",
            "preserve-walkability",
            "--terrain-only",
            "--minimise",
            "-W",
            "5",
            "-H",
            "4",
            "--steps",
            "6",
            "--four-corners",
            "--quiet",
        ]);
        assert_eq!(cli.mode, Mode::Evolve);
        assert!(cli.minimise);
        assert!(!cli.should_show_progress());

        let ga = cli.ga_params();
        assert_eq!(ga.seed, 7);
        assert_eq!(ga.population_size, 20);
        assert_eq!(ga.generation_count, 3);
        assert_eq!(ga.max_initial_mutation, 2);
        assert_eq!(ga.x_axis, FitnessAxis::SafeAreas);
        assert_eq!(ga.y_axis, FitnessAxis::ResourceSafety);
        assert_eq!(ga.mutation_policy, MutationPolicy::PreserveWalkability);
        assert!(!ga.generate_entities);

        let archive = cli.archive_params();
        assert_eq!((archive.width, archive.height, archive.steps), (5, 4, 6));
        assert_eq!(
            archive.schedule,
            Some(Pressure::four_corners(
                FitnessAxis::SafeAreas,
                FitnessAxis::ResourceSafety
            ))
        );
    }

    // Tests evolve mode writes the ranked population
    // Verified by writing only the best candidate
    #[test]
    fn test_session_evolve() {
        let dir = tempfile::tempdir().expect("temp dir");
        let (catalog, seed) = write_inputs(dir.path());
        let output = dir.path().join("out");
        let cli = Cli::parse_from([
            "mapsmith",
            catalog.as_str(),
            seed.as_str(),
            "-o",
            arg(&output).as_str(),
            "--mode",
            "evolve",
            "-p",
            "5",
            "-g",
            "2",
            "-q",
        ]);
        let written = Session::new(cli).run().expect("session succeeds");
        assert_eq!(written.len(), 5);
        assert_eq!(written.first(), Some(&output.join("duel_rank00.txt")));
        assert!(written.iter().all(|path| path.exists()));
    }

    // Tests elites mode writes one dump per occupied archive cell
    // Verified by writing every pooled candidate
    #[test]
    fn test_session_elites() {
        let dir = tempfile::tempdir().expect("temp dir");
        let (catalog, seed) = write_inputs(dir.path());
        let output = dir.path().join("archive");
        let cli = Cli::parse_from([
            "mapsmith",
            catalog.as_str(),
            seed.as_str(),
            "-o",
            arg(&output).as_str(),
            "-p",
            "4",
            "-g",
            "2",
            "--steps",
            "2",
            "--mutation-policy",
            "preserve-walkability",
            "--quiet",
        ]);
        let written = Session::new(cli).run().expect("session succeeds");
        assert!(!written.is_empty());
        for path in &written {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
            assert!(name.starts_with("duel_x") && name.ends_with(".txt"), "{name}");
            assert!(path.exists());
        }
    }

    // Tests a missing seed map surfaces as an error
    // Verified by skipping missing inputs
    #[test]
    fn test_session_missing_seed() {
        let dir = tempfile::tempdir().expect("temp dir");
        let (catalog, _) = write_inputs(dir.path());
        let missing = dir.path().join("absent.txt");
        let cli = Cli::parse_from([
            "mapsmith",
            catalog.as_str(),
            &arg(&missing),
            "-q",
        ]);
        assert!(Session::new(cli).run().is_err());
    }

    // Tests a second subscriber install reports failure instead of panicking
    // Verified by discarding the install result
    #[test]
    fn test_init_tracing_twice() {
        init_tracing();
        assert!(!init_tracing());
    }
}
