//! Input/output, configuration and error handling

/// Command-line interface and search session
pub mod cli;
/// Compile-time defaults and tunable constants
pub mod configuration;
/// Textual board dump rendering and parsing
pub mod dump;
/// Crate error type
pub mod error;
/// Progress bars for long searches
pub mod progress;
