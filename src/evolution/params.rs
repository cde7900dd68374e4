//! Search parameters: fitness axes, selection pressure and GA settings

use clap::ValueEnum;

use crate::board::candidate::MapCandidate;
use crate::io::configuration::{
    DEFAULT_ARCHIVE_STEPS, DEFAULT_ELITES_HEIGHT, DEFAULT_ELITES_WIDTH, DEFAULT_GENERATION_COUNT,
    DEFAULT_MAX_INITIAL_MUTATION, DEFAULT_POPULATION_SIZE, DEFAULT_SEED,
};
use crate::io::error::{Result, invalid_parameter};

/// Metric the search can optimise or index the archive by
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum FitnessAxis {
    /// Overall walkability symmetry
    Symmetry,
    /// Overall player fairness
    PlayerBalance,
    /// Ground crossed towards rivals
    Exploration,
    /// Margin-weighted controlled area
    SafeAreas,
    /// Margin-weighted controlled resources
    ResourceSafety,
}

impl FitnessAxis {
    /// Every axis in display order
    pub const ALL: [Self; 5] = [
        Self::Symmetry,
        Self::PlayerBalance,
        Self::Exploration,
        Self::SafeAreas,
        Self::ResourceSafety,
    ];

    /// The percentage this axis reads from a scored candidate
    pub const fn value(self, candidate: &MapCandidate) -> f64 {
        let stats = candidate.stats();
        match self {
            Self::Symmetry => stats.fitness.overall_symmetry,
            Self::PlayerBalance => stats.fitness.overall_player_fairness,
            Self::Exploration => stats.entity.exploration,
            Self::SafeAreas => stats.entity.safe_area,
            Self::ResourceSafety => stats.entity.resource_safety,
        }
    }

    /// [`Self::value`] scaled into `[0, 1]`
    pub const fn fraction(self, candidate: &MapCandidate) -> f64 {
        (self.value(candidate) / 100.0).clamp(0.0, 1.0)
    }
}

/// Display names for the fitness axes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisLabels {
    /// Label of [`FitnessAxis::Symmetry`]
    pub symmetry: String,
    /// Label of [`FitnessAxis::PlayerBalance`]
    pub player_balance: String,
    /// Label of [`FitnessAxis::Exploration`]
    pub exploration: String,
    /// Label of [`FitnessAxis::SafeAreas`]
    pub safe_areas: String,
    /// Label of [`FitnessAxis::ResourceSafety`]
    pub resource_safety: String,
}

impl Default for AxisLabels {
    fn default() -> Self {
        Self {
            symmetry: "Symmetry".to_owned(),
            player_balance: "Player Balance".to_owned(),
            exploration: "Exploration".to_owned(),
            safe_areas: "Safe Areas".to_owned(),
            resource_safety: "Resource Safety".to_owned(),
        }
    }
}

impl AxisLabels {
    /// Label of `axis`
    pub fn label(&self, axis: FitnessAxis) -> &str {
        match axis {
            FitnessAxis::Symmetry => &self.symmetry,
            FitnessAxis::PlayerBalance => &self.player_balance,
            FitnessAxis::Exploration => &self.exploration,
            FitnessAxis::SafeAreas => &self.safe_areas,
            FitnessAxis::ResourceSafety => &self.resource_safety,
        }
    }
}

/// Whether selection keeps the highest or the lowest values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Prefer larger values
    Maximise,
    /// Prefer smaller values
    Minimise,
}

/// Selection pressure of one GA run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pressure {
    /// Axis to rank by
    pub axis: FitnessAxis,
    /// Ranking direction
    pub direction: Direction,
}

impl Pressure {
    /// Prefer high values of `axis`
    pub const fn maximise(axis: FitnessAxis) -> Self {
        Self {
            axis,
            direction: Direction::Maximise,
        }
    }

    /// Prefer low values of `axis`
    pub const fn minimise(axis: FitnessAxis) -> Self {
        Self {
            axis,
            direction: Direction::Minimise,
        }
    }

    /// Schedule of one classic archive step: raise X, lower X twice, raise Y
    pub fn default_schedule(x_axis: FitnessAxis, y_axis: FitnessAxis) -> Vec<Self> {
        vec![
            Self::maximise(x_axis),
            Self::minimise(x_axis),
            Self::minimise(x_axis),
            Self::maximise(y_axis),
        ]
    }

    /// Push towards all four extremes of the archive once
    pub fn four_corners(x_axis: FitnessAxis, y_axis: FitnessAxis) -> Vec<Self> {
        vec![
            Self::maximise(x_axis),
            Self::minimise(x_axis),
            Self::maximise(y_axis),
            Self::minimise(y_axis),
        ]
    }

    /// Rank key of `candidate` where larger is always better
    pub const fn key(self, candidate: &MapCandidate) -> f64 {
        let value = self.axis.value(candidate);
        match self.direction {
            Direction::Maximise => value,
            Direction::Minimise => -value,
        }
    }
}

/// How mutation picks a replacement tile type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MutationPolicy {
    /// Any tile type in the catalog
    #[default]
    Any,
    /// Only tile types with the same walkability as the replaced tile
    PreserveWalkability,
}

/// Genetic algorithm settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GaParams {
    /// Individuals per generation after the first
    pub population_size: usize,
    /// Generations evolved per run
    pub generation_count: usize,
    /// Upper bound on mutated cells per initial individual
    pub max_initial_mutation: usize,
    /// First optimised axis, also the archive's X axis
    pub x_axis: FitnessAxis,
    /// Second optimised axis, also the archive's Y axis
    pub y_axis: FitnessAxis,
    /// Whether buried entities are relocated, otherwise entity cells are
    /// pinned and only the surrounding terrain evolves
    pub generate_entities: bool,
    /// Replacement tile policy for mutation
    pub mutation_policy: MutationPolicy,
    /// Seed of the run's random number generator
    pub seed: u64,
}

impl Default for GaParams {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            generation_count: DEFAULT_GENERATION_COUNT,
            max_initial_mutation: DEFAULT_MAX_INITIAL_MUTATION,
            x_axis: FitnessAxis::Symmetry,
            y_axis: FitnessAxis::PlayerBalance,
            generate_entities: true,
            mutation_policy: MutationPolicy::Any,
            seed: DEFAULT_SEED,
        }
    }
}

impl GaParams {
    /// Check that the settings describe a runnable search
    ///
    /// # Errors
    ///
    /// Returns an error if the population is empty or both axes are the same
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(invalid_parameter(
                "population_size",
                &self.population_size,
                &"must be at least 1",
            ));
        }
        if self.x_axis == self.y_axis {
            return Err(invalid_parameter(
                "y_axis",
                &format!("{:?}", self.y_axis),
                &"must differ from the X axis",
            ));
        }
        Ok(())
    }
}

/// MAP-Elites archive settings
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveParams {
    /// Cells along the X axis
    pub width: usize,
    /// Cells along the Y axis
    pub height: usize,
    /// Generation steps run by [`crate::evolution::elites::MapElites::run`]
    pub steps: usize,
    /// GA pressures run per step, defaults to [`Pressure::default_schedule`]
    pub schedule: Option<Vec<Pressure>>,
    /// Display names of the axes
    pub labels: AxisLabels,
}

impl Default for ArchiveParams {
    fn default() -> Self {
        Self {
            width: DEFAULT_ELITES_WIDTH,
            height: DEFAULT_ELITES_HEIGHT,
            steps: DEFAULT_ARCHIVE_STEPS,
            schedule: None,
            labels: AxisLabels::default(),
        }
    }
}

impl ArchiveParams {
    /// Pressures of one step for the given axes
    pub fn schedule_for(&self, x_axis: FitnessAxis, y_axis: FitnessAxis) -> Vec<Pressure> {
        self.schedule
            .clone()
            .unwrap_or_else(|| Pressure::default_schedule(x_axis, y_axis))
    }

    /// Check that the archive has cells and every step runs at least one GA
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero or the schedule is empty
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(invalid_parameter(
                "archive dimensions",
                &format!("{}x{}", self.width, self.height),
                &"must be positive",
            ));
        }
        if self.schedule.as_ref().is_some_and(Vec::is_empty) {
            return Err(invalid_parameter(
                "schedule",
                &"[]",
                &"must contain at least one pressure",
            ));
        }
        Ok(())
    }
}
