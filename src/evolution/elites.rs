//! MAP-Elites driver around the genetic algorithm
//!
//! One step picks a parent (a random elite, or the original seed while the
//! archive is still empty), runs the GA once per pressure of the schedule
//! against that parent, pools the results and offers every feasible
//! individual to the archive. [`MapElites::step_from`] breeds from a chosen
//! cell instead.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::board::candidate::MapCandidate;
use crate::board::catalog::TypeCatalog;
use crate::evolution::archive::{Archive, CellCoord, InsertOutcome};
use crate::evolution::genetic::{GenerationReport, GeneticAlgorithm};
use crate::evolution::params::{ArchiveParams, GaParams, Pressure};
use crate::io::error::{Result, invalid_parameter};

/// Outcome counts of one archive step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepSummary {
    /// 1-based step number
    pub step: usize,
    /// Whether the parent was an archived elite rather than the seed
    pub from_elite: bool,
    /// Candidates placed in empty cells
    pub inserted: usize,
    /// Candidates that displaced an occupant
    pub replaced: usize,
    /// Candidates that lost to the occupant
    pub rejected: usize,
    /// Candidates skipped as infeasible
    pub infeasible: usize,
    /// Occupied cells after the step
    pub occupied: usize,
}

/// Quality-diversity search over one seed map
pub struct MapElites {
    params: ArchiveParams,
    schedule: Vec<Pressure>,
    ga: GeneticAlgorithm,
    archive: Archive,
    seed: MapCandidate,
    rng: StdRng,
    steps_run: usize,
}

impl MapElites {
    /// Create an empty archive indexed by the GA's X and Y axes
    ///
    /// # Errors
    ///
    /// Returns an error if either parameter set is invalid or the catalog
    /// offers no genes
    pub fn new(
        catalog: &TypeCatalog,
        ga_params: GaParams,
        params: ArchiveParams,
        seed: MapCandidate,
    ) -> Result<Self> {
        params.validate()?;
        let (x_axis, y_axis) = (ga_params.x_axis, ga_params.y_axis);
        let rng = StdRng::seed_from_u64(ga_params.seed);
        let ga = GeneticAlgorithm::new(catalog, ga_params)?;
        let archive = Archive::new(params.width, params.height, x_axis, y_axis)?;
        Ok(Self {
            schedule: params.schedule_for(x_axis, y_axis),
            params,
            ga,
            archive,
            seed,
            rng,
            steps_run: 0,
        })
    }

    /// The archive built so far
    pub const fn archive(&self) -> &Archive {
        &self.archive
    }

    /// Take the archive, ending the search
    pub fn into_archive(self) -> Archive {
        self.archive
    }

    /// Pressures run by every step
    pub fn schedule(&self) -> &[Pressure] {
        &self.schedule
    }

    /// Run one generation step
    ///
    /// # Errors
    ///
    /// Returns an error if a GA run fails
    pub fn step(&mut self) -> Result<StepSummary> {
        self.step_with(|_, _| {})
    }

    /// [`Self::step`] with a callback after every GA generation
    ///
    /// The callback receives the index of the running pressure within the
    /// schedule and the generation report.
    ///
    /// # Errors
    ///
    /// Returns an error if a GA run fails
    pub fn step_with<F>(&mut self, observer: F) -> Result<StepSummary>
    where
        F: FnMut(usize, &GenerationReport),
    {
        let elite = self.archive.random_elite(&mut self.rng).cloned();
        let from_elite = elite.is_some();
        let parent = elite.unwrap_or_else(|| self.seed.clone());
        self.breed(&parent, from_elite, observer)
    }

    /// Run one generation step bred from the elite in `cell`
    ///
    /// # Errors
    ///
    /// Returns an error if `cell` is empty or a GA run fails
    pub fn step_from(&mut self, cell: CellCoord) -> Result<StepSummary> {
        let parent = self.archive.get(cell).cloned().ok_or_else(|| {
            invalid_parameter(
                "cell",
                &format!("({}, {})", cell.x, cell.y),
                &"no elite occupies this archive cell",
            )
        })?;
        self.breed(&parent, true, |_, _| {})
    }

    fn breed<F>(
        &mut self,
        parent: &MapCandidate,
        from_elite: bool,
        mut observer: F,
    ) -> Result<StepSummary>
    where
        F: FnMut(usize, &GenerationReport),
    {
        self.steps_run += 1;
        let mut pooled = Vec::new();
        for (index, &pressure) in self.schedule.iter().enumerate() {
            let results = self
                .ga
                .run_with(parent, pressure, |report| observer(index, report))?;
            pooled.extend(results);
        }

        let mut summary = StepSummary {
            step: self.steps_run,
            from_elite,
            ..StepSummary::default()
        };
        for candidate in pooled {
            if !candidate.is_feasible() {
                summary.infeasible += 1;
                continue;
            }
            match self.archive.insert(candidate) {
                InsertOutcome::Inserted(_) => summary.inserted += 1,
                InsertOutcome::Replaced(_) => summary.replaced += 1,
                InsertOutcome::Rejected(_) => summary.rejected += 1,
            }
        }
        summary.occupied = self.archive.len();

        info!(
            step = summary.step,
            from_elite,
            inserted = summary.inserted,
            replaced = summary.replaced,
            rejected = summary.rejected,
            infeasible = summary.infeasible,
            coverage = self.archive.coverage(),
            "archive step finished"
        );
        Ok(summary)
    }

    /// Run the configured number of steps
    ///
    /// # Errors
    ///
    /// Returns an error if a GA run fails
    pub fn run(&mut self) -> Result<Vec<StepSummary>> {
        (0..self.params.steps).map(|_| self.step()).collect()
    }
}
