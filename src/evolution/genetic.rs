//! Generational genetic algorithm over tile genomes
//!
//! A genome is the row-major tile list of a board. Every run starts from a
//! seed candidate, evolves for a fixed number of generations under one
//! [`Pressure`], and returns the last population ranked best first. Every
//! individual is scored as soon as it is created.

use std::collections::VecDeque;

use bitvec::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::board::candidate::MapCandidate;
use crate::board::catalog::TypeCatalog;
use crate::board::grid::Board;
use crate::board::tile::{Coord, Entity, Tile};
use crate::evolution::genes::TileGenes;
use crate::evolution::params::{GaParams, Pressure};
use crate::io::configuration::{
    CROSSOVER_PARENT_A, CROSSOVER_PARENT_B, ELITE_FRACTION, RELOCATION_ATTEMPTS,
};
use crate::io::error::{MapError, Result, invalid_board};
use crate::metrics::scoring::evaluate;

/// Summary of one finished generation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationReport {
    /// 1-based generation number
    pub generation: usize,
    /// Axis value of the best ranked individual
    pub best: f64,
    /// Axis value of the weakest surviving elite
    pub elite_floor: f64,
    /// Feasible individuals in the ranked population
    pub feasible: usize,
}

/// Seeded genetic algorithm
pub struct GeneticAlgorithm {
    params: GaParams,
    genes: TileGenes,
    rng: StdRng,
    serial: usize,
}

impl GeneticAlgorithm {
    /// Create a GA drawing genes from `catalog`
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid or the catalog offers
    /// no genes
    pub fn new(catalog: &TypeCatalog, params: GaParams) -> Result<Self> {
        Self::with_genes(TileGenes::from_catalog(catalog)?, params)
    }

    /// Create a GA over explicit gene pools
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid
    pub fn with_genes(genes: TileGenes, params: GaParams) -> Result<Self> {
        params.validate()?;
        let rng = StdRng::seed_from_u64(params.seed);
        Ok(Self {
            params,
            genes,
            rng,
            serial: 0,
        })
    }

    /// Settings of this GA
    pub const fn params(&self) -> &GaParams {
        &self.params
    }

    /// Number of individuals kept unchanged between generations
    pub fn elite_count(&self) -> usize {
        let scaled = (self.params.population_size as f64 * ELITE_FRACTION).floor() as usize;
        scaled.clamp(1, self.params.population_size)
    }

    /// Evolve from `seed` and return the final population, best first
    ///
    /// # Errors
    ///
    /// Returns an error if the seed board breaks a genome invariant
    pub fn run(&mut self, seed: &MapCandidate, pressure: Pressure) -> Result<Vec<MapCandidate>> {
        self.run_with(seed, pressure, |_| {})
    }

    /// [`Self::run`] with a callback after every generation
    ///
    /// # Errors
    ///
    /// Returns an error if the seed board breaks a genome invariant
    pub fn run_with<F>(
        &mut self,
        seed: &MapCandidate,
        pressure: Pressure,
        mut observer: F,
    ) -> Result<Vec<MapCandidate>>
    where
        F: FnMut(&GenerationReport),
    {
        let mut population = self.initial_population(seed)?;

        for generation in 1..=self.params.generation_count {
            let ranking = rank(&population, pressure);
            let elite_count = self.elite_count().min(ranking.len());

            let floor = elite_count.saturating_sub(1);
            let report = GenerationReport {
                generation,
                best: value_at(&population, &ranking, 0, pressure),
                elite_floor: value_at(&population, &ranking, floor, pressure),
                feasible: population.iter().filter(|c| c.is_feasible()).count(),
            };
            debug!(
                generation,
                best = report.best,
                elite_floor = report.elite_floor,
                feasible = report.feasible,
                "generation ranked"
            );

            let offspring_count = self.params.population_size.saturating_sub(elite_count);
            let mut next = Vec::with_capacity(self.params.population_size);
            let mut offspring = Vec::with_capacity(offspring_count);
            for _ in 0..offspring_count {
                let first = self.rng.random_range(0..population.len());
                let second = self.rng.random_range(0..population.len());
                if let (Some(parent_a), Some(parent_b)) =
                    (population.get(first), population.get(second))
                {
                    offspring.push(self.offspring_or_parent(parent_a, parent_b)?);
                }
            }

            // Survivors move out of the old arena instead of being cloned
            let mut arena: Vec<Option<MapCandidate>> = population.into_iter().map(Some).collect();
            for &index in ranking.iter().take(elite_count) {
                if let Some(elite) = arena.get_mut(index).and_then(Option::take) {
                    next.push(elite);
                }
            }
            next.extend(offspring);
            population = next;

            observer(&report);
        }

        let ranking = rank(&population, pressure);
        let mut arena: Vec<Option<MapCandidate>> = population.into_iter().map(Some).collect();
        Ok(ranking
            .into_iter()
            .filter_map(|index| arena.get_mut(index).and_then(Option::take))
            .collect())
    }

    /// Scored seed followed by `population_size` mutated copies
    ///
    /// # Errors
    ///
    /// Returns an error if the seed board breaks a genome invariant
    pub fn initial_population(&mut self, seed: &MapCandidate) -> Result<Vec<MapCandidate>> {
        let mut scored_seed = seed.clone();
        evaluate(&mut scored_seed)?;

        let mut population = Vec::with_capacity(self.params.population_size + 1);
        population.push(scored_seed);
        for _ in 0..self.params.population_size {
            let count = self.rng.random_range(0..=self.params.max_initial_mutation);
            let mut mutant = match self.mutant(seed, count) {
                Ok(mutant) => mutant,
                Err(MapError::NoWalkableTile { entity_id }) => {
                    warn!(entity_id, "mutant lost every walkable tile, keeping the seed");
                    seed.clone()
                }
                Err(err) => return Err(err),
            };
            evaluate(&mut mutant)?;
            population.push(mutant);
        }
        Ok(population)
    }

    /// Copy of `seed` with up to `count` randomly chosen cells mutated
    ///
    /// Locked cells are skipped. Entities follow the same placement rules as
    /// in [`Self::mate`], and in terrain-only mode their cells are skipped too.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::NoWalkableTile`] if entities must be kept and no
    /// walkable tile remains
    pub fn mutant(&mut self, seed: &MapCandidate, count: usize) -> Result<MapCandidate> {
        let board = seed.board();
        let (width, height) = (board.width(), board.height());
        let pinned = self.pinned_cells(seed);
        let mut genome = board.to_genome();
        for _ in 0..count {
            let index = self.rng.random_range(0..genome.len());
            if pinned.get(index).as_deref() == Some(&true) {
                continue;
            }
            if let Some(tile) = genome.get_mut(index) {
                *tile = self
                    .genes
                    .mutate(tile, self.params.mutation_policy, &mut self.rng);
            }
        }
        self.assemble(width, height, genome, seed.entities())
    }

    /// Cross two parents cell by cell
    ///
    /// Each unlocked cell comes from parent A, parent B, or a fresh mutation
    /// of parent A's tile. Locked cells always come from parent A. Parent A's
    /// entities are carried over. When the GA generates entities, buried ones
    /// are relocated. In terrain-only mode they stay put and the cells under
    /// them are pinned to parent A.
    ///
    /// # Errors
    ///
    /// Returns an error if the parents differ in size, or
    /// [`MapError::NoWalkableTile`] if entities must be kept and no walkable
    /// tile remains
    pub fn mate(
        &mut self,
        parent_a: &MapCandidate,
        parent_b: &MapCandidate,
    ) -> Result<MapCandidate> {
        let (board_a, board_b) = (parent_a.board(), parent_b.board());
        if board_a.width() != board_b.width() || board_a.height() != board_b.height() {
            return Err(invalid_board(&format!(
                "cannot cross a {}x{} board with a {}x{} board",
                board_a.width(),
                board_a.height(),
                board_b.width(),
                board_b.height()
            )));
        }

        let pinned = self.pinned_cells(parent_a);
        let genome = board_a
            .tiles()
            .zip(board_b.tiles())
            .enumerate()
            .map(|(index, (tile_a, tile_b))| {
                if tile_a.locked || pinned.get(index).as_deref() == Some(&true) {
                    return tile_a.clone();
                }
                let draw = self.rng.random::<f64>();
                if draw < CROSSOVER_PARENT_A {
                    tile_a.clone()
                } else if draw < CROSSOVER_PARENT_B {
                    tile_b.clone()
                } else {
                    self.genes
                        .mutate(tile_a, self.params.mutation_policy, &mut self.rng)
                }
            })
            .collect();

        self.assemble(board_a.width(), board_a.height(), genome, parent_a.entities())
    }

    fn offspring_or_parent(
        &mut self,
        parent_a: &MapCandidate,
        parent_b: &MapCandidate,
    ) -> Result<MapCandidate> {
        let mut child = match self.mate(parent_a, parent_b) {
            Ok(child) => child,
            Err(MapError::NoWalkableTile { entity_id }) => {
                warn!(entity_id, "offspring lost every walkable tile, keeping parent A");
                return Ok(parent_a.clone());
            }
            Err(err) => return Err(err),
        };
        evaluate(&mut child)?;
        Ok(child)
    }

    /// Cells whose tiles must not change, one bit per genome index
    fn pinned_cells(&self, parent: &MapCandidate) -> BitVec {
        let board = parent.board();
        let mut pinned = bitvec![0; board.len()];
        if !self.params.generate_entities {
            for entity in parent.entities() {
                if let Some(index) = board.flat_index(entity.position) {
                    pinned.set(index, true);
                }
            }
        }
        pinned
    }

    fn assemble(
        &mut self,
        width: usize,
        height: usize,
        genome: Vec<Tile>,
        entities: &[Entity],
    ) -> Result<MapCandidate> {
        let board = Board::from_genome(width, height, genome)?;
        self.serial += 1;
        let name = format!("map-{:04}", self.serial);
        if !self.params.generate_entities {
            return MapCandidate::with_entities(name, board, entities.to_vec());
        }

        let mut placed = Vec::with_capacity(entities.len());
        for entity in entities {
            let mut entity = entity.clone();
            if !board.is_walkable(entity.position) {
                entity.position = relocation_target(&board, entity.position, &mut self.rng)
                    .ok_or(MapError::NoWalkableTile {
                        entity_id: entity.id,
                    })?;
            }
            placed.push(entity);
        }
        MapCandidate::with_entities(name, board, placed)
    }
}

/// New walkable cell for an entity stranded at `origin`
///
/// Samples cells uniformly for a bounded number of attempts, then falls back
/// to the nearest walkable cell by ring distance. `None` only when the board
/// has no walkable tile at all.
pub fn relocation_target<R: Rng>(board: &Board, origin: Coord, rng: &mut R) -> Option<Coord> {
    for _ in 0..RELOCATION_ATTEMPTS {
        let candidate = Coord::new(
            rng.random_range(0..board.width()) as i32,
            rng.random_range(0..board.height()) as i32,
        );
        if board.is_walkable(candidate) {
            return Some(candidate);
        }
    }

    warn!(%origin, "random relocation failed, searching outward");
    nearest_walkable(board, origin)
}

fn nearest_walkable(board: &Board, origin: Coord) -> Option<Coord> {
    let start = board.flat_index(origin)?;
    let mut visited = bitvec![0; board.len()];
    visited.set(start, true);
    let mut frontier = VecDeque::from([origin]);

    while let Some(current) = frontier.pop_front() {
        if board.is_walkable(current) {
            return Some(current);
        }
        for next in current.neighbors8() {
            if let Some(index) = board.flat_index(next)
                && visited.get(index).as_deref() == Some(&false)
            {
                visited.set(index, true);
                frontier.push_back(next);
            }
        }
    }
    None
}

/// Population indices ordered best first under `pressure`
///
/// The sort is stable, so equally ranked individuals keep their order.
fn rank(population: &[MapCandidate], pressure: Pressure) -> Vec<usize> {
    let mut ranking: Vec<usize> = (0..population.len()).collect();
    ranking.sort_by(|&a, &b| {
        let key_a = population.get(a).map_or(f64::NEG_INFINITY, |c| pressure.key(c));
        let key_b = population.get(b).map_or(f64::NEG_INFINITY, |c| pressure.key(c));
        key_b.total_cmp(&key_a)
    });
    ranking
}

fn value_at(
    population: &[MapCandidate],
    ranking: &[usize],
    position: usize,
    pressure: Pressure,
) -> f64 {
    ranking
        .get(position)
        .and_then(|&index| population.get(index))
        .map_or(0.0, |candidate| pressure.axis.value(candidate))
}
