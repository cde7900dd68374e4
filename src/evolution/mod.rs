//! Evolutionary map search
//!
//! The genetic algorithm evolves tile genomes under one selection pressure at
//! a time. MAP-Elites drives it through a pressure schedule and keeps the
//! best map found for each region of a two-axis fitness plane.

/// MAP-Elites archive and bucketing
pub mod archive;
/// MAP-Elites driver
pub mod elites;
/// Tile gene pools
pub mod genes;
/// Generational GA
pub mod genetic;
/// Fitness axes, pressures and search settings
pub mod params;

pub use archive::Archive;
pub use elites::MapElites;
pub use genetic::GeneticAlgorithm;
pub use params::{ArchiveParams, FitnessAxis, GaParams, Pressure};
