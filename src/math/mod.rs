//! Numeric helpers for the metrics engine

/// Percentages, means and min/max ratios over generic numbers
pub mod ratio;
