//! Command-line interface: load a catalog and a seed map, search, write dumps

use crate::board::candidate::MapCandidate;
use crate::board::catalog::TypeCatalog;
use crate::evolution::archive::Archive;
use crate::evolution::elites::MapElites;
use crate::evolution::genetic::GeneticAlgorithm;
use crate::evolution::params::{ArchiveParams, FitnessAxis, GaParams, MutationPolicy, Pressure};
use crate::io::configuration::{
    DEFAULT_ARCHIVE_STEPS, DEFAULT_ELITES_HEIGHT, DEFAULT_ELITES_WIDTH, DEFAULT_GENERATION_COUNT,
    DEFAULT_MAX_INITIAL_MUTATION, DEFAULT_POPULATION_SIZE, DEFAULT_SEED, DUMP_EXTENSION,
};
use crate::io::dump::{read_dump, write_dump};
use crate::io::error::{Result, WithPath};
use crate::io::progress::ProgressManager;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{info, warn};

/// Search to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// One GA run under a single pressure
    Evolve,
    /// MAP-Elites steps over the X and Y axes
    Elites,
}

#[derive(Parser)]
#[command(name = "mapsmith")]
#[command(
    author,
    version,
    about = "Score strategy game maps and search for balanced variants"
)]
/// Command-line arguments for the map search tool
// Search toggles are independent switches
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// JSON tile and entity type catalog
    #[arg(value_name = "CATALOG")]
    pub catalog: PathBuf,

    /// Textual dump of the seed map
    #[arg(value_name = "SEED_MAP")]
    pub seed_map: PathBuf,

    /// Directory receiving the generated dumps
    #[arg(short, long, default_value = "maps")]
    pub output: PathBuf,

    /// Search to run
    #[arg(long, value_enum, default_value_t = Mode::Elites)]
    pub mode: Mode,

    /// Random seed for reproducible search
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Individuals per generation
    #[arg(short, long, default_value_t = DEFAULT_POPULATION_SIZE)]
    pub population: usize,

    /// Generations per GA run
    #[arg(short, long, default_value_t = DEFAULT_GENERATION_COUNT)]
    pub generations: usize,

    /// Upper bound on mutated cells per initial individual
    #[arg(short, long, default_value_t = DEFAULT_MAX_INITIAL_MUTATION)]
    pub max_mutation: usize,

    /// First fitness axis, the archive's columns
    #[arg(short, long, value_enum, default_value_t = FitnessAxis::Symmetry)]
    pub x_axis: FitnessAxis,

    /// Second fitness axis, the archive's rows
    #[arg(short, long, value_enum, default_value_t = FitnessAxis::PlayerBalance)]
    pub y_axis: FitnessAxis,

    /// Replacement tile policy for mutation
    #[arg(long, value_enum, default_value_t = MutationPolicy::Any)]
    pub mutation_policy: MutationPolicy,

    /// Keep entities where they stand and evolve the terrain around them
    #[arg(long)]
    pub terrain_only: bool,

    /// Minimise the X axis instead of maximising it (evolve mode)
    #[arg(long)]
    pub minimise: bool,

    /// Archive columns
    #[arg(short = 'W', long, default_value_t = DEFAULT_ELITES_WIDTH)]
    pub width: usize,

    /// Archive rows
    #[arg(short = 'H', long, default_value_t = DEFAULT_ELITES_HEIGHT)]
    pub height: usize,

    /// Archive steps to run (elites mode)
    #[arg(long, default_value_t = DEFAULT_ARCHIVE_STEPS)]
    pub steps: usize,

    /// Push towards all four archive extremes each step instead of the classic schedule
    #[arg(long)]
    pub four_corners: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// GA settings selected by the flags
    pub const fn ga_params(&self) -> GaParams {
        GaParams {
            population_size: self.population,
            generation_count: self.generations,
            max_initial_mutation: self.max_mutation,
            x_axis: self.x_axis,
            y_axis: self.y_axis,
            generate_entities: !self.terrain_only,
            mutation_policy: self.mutation_policy,
            seed: self.seed,
        }
    }

    /// Archive settings selected by the flags
    pub fn archive_params(&self) -> ArchiveParams {
        ArchiveParams {
            width: self.width,
            height: self.height,
            steps: self.steps,
            schedule: self
                .four_corners
                .then(|| Pressure::four_corners(self.x_axis, self.y_axis)),
            ..ArchiveParams::default()
        }
    }
}

/// Runs one search from the command line and writes its results
pub struct Session {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl Session {
    /// Create a session for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Load the inputs, run the selected search and write every result
    ///
    /// Returns the paths of the written dumps.
    ///
    /// # Errors
    ///
    /// Returns an error if an input cannot be loaded, the parameters are
    /// invalid, the search fails or an output cannot be written
    pub fn run(&mut self) -> Result<Vec<PathBuf>> {
        let catalog = TypeCatalog::from_path(&self.cli.catalog)?;
        let seed = read_dump(&self.cli.seed_map, &catalog)?;
        std::fs::create_dir_all(&self.cli.output).with_path(&self.cli.output, "create output")?;
        info!(
            seed = %seed.name,
            width = seed.board().width(),
            height = seed.board().height(),
            entities = seed.entities().len(),
            "seed map loaded"
        );

        let written = match self.cli.mode {
            Mode::Evolve => self.evolve(&catalog, &seed)?,
            Mode::Elites => self.elites(&catalog, seed)?,
        };

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }
        info!(files = written.len(), output = %self.cli.output.display(), "dumps written");
        Ok(written)
    }

    fn evolve(&mut self, catalog: &TypeCatalog, seed: &MapCandidate) -> Result<Vec<PathBuf>> {
        let params = self.cli.ga_params();
        let pressure = if self.cli.minimise {
            Pressure::minimise(params.x_axis)
        } else {
            Pressure::maximise(params.x_axis)
        };
        let generations = params.generation_count;
        let mut ga = GeneticAlgorithm::new(catalog, params)?;

        let bar = self
            .progress_manager
            .as_mut()
            .map(|pm| pm.start("evolve", generations));
        let progress = self.progress_manager.as_ref();
        let population = ga.run_with(seed, pressure, |report| {
            if let (Some(pm), Some(index)) = (progress, bar) {
                pm.advance(index, 0, report);
            }
        })?;
        if let (Some(pm), Some(index)) = (progress, bar) {
            pm.complete(index, format!("{} maps", population.len()));
        }

        let mut written = Vec::with_capacity(population.len());
        for (rank, candidate) in population.iter().enumerate() {
            let path = self.output_path(&seed.name, &format!("rank{rank:02}"));
            write_dump(&path, candidate, catalog)?;
            written.push(path);
        }
        Ok(written)
    }

    fn elites(&mut self, catalog: &TypeCatalog, seed: MapCandidate) -> Result<Vec<PathBuf>> {
        let ga_params = self.cli.ga_params();
        let archive_params = self.cli.archive_params();
        let generations = ga_params.generation_count;
        let steps = archive_params.steps;
        let seed_name = seed.name.clone();
        let mut elites = MapElites::new(catalog, ga_params, archive_params, seed)?;
        let span = elites.schedule().len() * generations;

        for step in 1..=steps {
            let bar = self
                .progress_manager
                .as_mut()
                .map(|pm| pm.start(&format!("step {step}/{steps}"), span));
            let progress = self.progress_manager.as_ref();
            let summary = elites.step_with(|pressure_index, report| {
                if let (Some(pm), Some(index)) = (progress, bar) {
                    pm.advance(index, pressure_index * generations, report);
                }
            })?;
            if let (Some(pm), Some(index)) = (progress, bar) {
                pm.complete(
                    index,
                    format!(
                        "+{} new, {} replaced, {} occupied",
                        summary.inserted, summary.replaced, summary.occupied
                    ),
                );
            }
        }

        self.write_archive(catalog, &seed_name, elites.archive())
    }

    fn write_archive(
        &self,
        catalog: &TypeCatalog,
        seed_name: &str,
        archive: &Archive,
    ) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(archive.len());
        for (cell, elite) in archive.occupied() {
            let path = self.output_path(seed_name, &format!("x{}_y{}", cell.x, cell.y));
            write_dump(&path, elite, catalog)?;
            written.push(path);
        }
        Ok(written)
    }

    fn output_path(&self, seed_name: &str, suffix: &str) -> PathBuf {
        self.cli
            .output
            .join(format!("{seed_name}_{suffix}.{DUMP_EXTENSION}"))
    }
}

/// Install the stderr log subscriber filtered by `RUST_LOG`
///
/// Returns `false` when a global subscriber already exists. That subscriber
/// stays in place and receives a warning instead.
pub fn init_tracing() -> bool {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
    match installed {
        Ok(()) => true,
        Err(error) => {
            warn!(%error, "keeping the existing tracing subscriber");
            false
        }
    }
}
