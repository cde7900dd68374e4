//! Metrics engine
//!
//! Pure scoring over a finished candidate. [`scoring::evaluate`] runs every
//! metric and stores the resulting [`stats::MapStats`] on the candidate.
//! All percentages lie in `[0, 100]`.

/// Resource count, used space and base distances
pub mod basic;
/// Ground crossed on the way to rival entities
pub mod exploration;
/// Entity allocation fairness
pub mod fairness;
/// Safe areas and resource safety
pub mod safety;
/// Feasibility and full scoring
pub mod scoring;
/// Metric groups stored on candidates
pub mod stats;
/// Walkability symmetry
pub mod symmetry;

pub use scoring::{evaluate, is_feasible};
pub use stats::MapStats;
