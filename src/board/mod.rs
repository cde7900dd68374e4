//! Map data model
//!
//! This module contains the pure data side of a map:
//! - Coordinates, tiles, owners and entities
//! - The bounds-checked board grid
//! - The tile and entity type catalog
//! - Map candidates carrying their scored metrics

/// Map candidate with entities and stored scores
pub mod candidate;
/// Tile and entity type catalog
pub mod catalog;
/// Board grid and bounding boxes
pub mod grid;
/// Coordinates, tiles, owners and entities
pub mod tile;

pub use candidate::MapCandidate;
pub use catalog::TypeCatalog;
pub use grid::Board;
