//! Search constants and runtime configuration defaults

// Genetic algorithm defaults
/// Individuals kept per generation
pub const DEFAULT_POPULATION_SIZE: usize = 12;
/// Generations evolved per GA run
pub const DEFAULT_GENERATION_COUNT: usize = 10;
/// Upper bound on mutated cells when seeding the initial population
pub const DEFAULT_MAX_INITIAL_MUTATION: usize = 10;

/// Fraction of the population carried unchanged into the next generation
pub const ELITE_FRACTION: f64 = 0.10;

// Crossover draws below the first threshold inherit from parent A, below the
// second from parent B, and mutate otherwise
/// Upper bound of the parent A band
pub const CROSSOVER_PARENT_A: f64 = 0.45;
/// Upper bound of the parent B band
pub const CROSSOVER_PARENT_B: f64 = 0.90;

// Prevents unbounded resampling on nearly closed boards
/// Uniform resampling attempts before the BFS fallback relocates an entity
pub const RELOCATION_ATTEMPTS: usize = 64;

// MAP-Elites defaults
/// Archive cells along the X axis
pub const DEFAULT_ELITES_WIDTH: usize = 10;
/// Archive cells along the Y axis
pub const DEFAULT_ELITES_HEIGHT: usize = 10;
/// Archive steps run by the CLI
pub const DEFAULT_ARCHIVE_STEPS: usize = 1;

/// Values this close to a bucket boundary snap onto it
pub const BUCKET_SNAP_EPSILON: f64 = 1e-9;

// Caps pairwise exploration fills on large boards
/// Extra tiles added to the A* length when sizing the exploration box
pub const EXPLORATION_BOX_MARGIN: i32 = 1;

/// Tile id reserved for fog of war, never used as a gene
pub const FOG_OF_WAR_TILE_ID: i32 = -1;

// Textual board dump layout
/// Characters written per cell (symbol plus two slots)
pub const DUMP_CELL_WIDTH: usize = 3;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

// Output settings
/// Extension of written board dumps
pub const DUMP_EXTENSION: &str = "txt";
