//! Fitness scoring and quality-diversity search for strategy game tile maps
//!
//! A map candidate is a tile grid plus owned entities. The metrics engine
//! scores it for symmetry, player fairness, exploration and safety using
//! flood fills and A* distances, and a genetic algorithm wrapped in a
//! MAP-Elites archive searches for diverse, high-scoring variants.

#![forbid(unsafe_code)]

/// Tiles, entities, the board grid, the type catalog and map candidates
pub mod board;
/// Genetic algorithm and MAP-Elites archive
pub mod evolution;
/// Command-line interface, textual dumps, configuration and error handling
pub mod io;
/// Percentage and ratio helpers
pub mod math;
/// Symmetry, fairness, exploration and safety metrics
pub mod metrics;
/// Flood fills and A* pathfinding
pub mod search;

pub use io::error::{MapError, Result};
