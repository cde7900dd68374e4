//! Graph search over the walkable grid
//!
//! Two collaborators drive every distance-based metric:
//! - [`reachability`]: worklist flood fills, unbounded or boxed towards a target
//! - [`pathfinder`]: an A* shortest-path oracle with pooled buffers

/// A* shortest paths and single-source distance fields
pub mod pathfinder;
/// Unbounded and bounded flood fills
pub mod reachability;

pub use pathfinder::{PathResult, Pathfinder};
pub use reachability::{Reachability, Reachable};
