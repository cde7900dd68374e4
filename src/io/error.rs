//! Error types and context management for map operations

use std::fmt;
use std::path::{Path, PathBuf};

use crate::board::tile::Coord;

/// Main error type for all map operations
#[derive(Debug)]
pub enum MapError {
    /// Coordinate lies outside the board
    OutOfBounds {
        /// The offending coordinate
        coord: Coord,
        /// Board dimensions (width, height)
        dimensions: (usize, usize),
    },

    /// Tile type id missing from the catalog
    UnknownTileType {
        /// The missing id
        id: i32,
    },

    /// Entity type id missing from the catalog
    UnknownEntityType {
        /// The missing id
        id: i32,
    },

    /// Board dump contains a symbol no catalog entry uses
    UnknownSymbol {
        /// The unrecognised symbol
        symbol: char,
        /// Row of the cell in the dump
        row: usize,
        /// Column of the cell in the dump
        col: usize,
    },

    /// Catalog content violates a catalog rule
    InvalidCatalog {
        /// Description of what's wrong with the catalog
        reason: String,
    },

    /// Board data doesn't describe a valid board
    InvalidBoard {
        /// Description of what's wrong with the board
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// No walkable tile exists anywhere to place an entity
    NoWalkableTile {
        /// Id of the entity that could not be placed
        entity_id: u32,
    },

    /// Catalog file is not valid JSON for the catalog schema
    CatalogParse {
        /// Path to the catalog file
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { coord, dimensions } => {
                write!(
                    f,
                    "Coordinate ({}, {}) is outside the {}x{} board",
                    coord.x, coord.y, dimensions.0, dimensions.1
                )
            }
            Self::UnknownTileType { id } => write!(f, "Unknown tile type id {id}"),
            Self::UnknownEntityType { id } => write!(f, "Unknown entity type id {id}"),
            Self::UnknownSymbol { symbol, row, col } => {
                write!(f, "Unknown symbol '{symbol}' at row {row}, column {col}")
            }
            Self::InvalidCatalog { reason } => write!(f, "Invalid catalog: {reason}"),
            Self::InvalidBoard { reason } => write!(f, "Invalid board: {reason}"),
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::NoWalkableTile { entity_id } => {
                write!(f, "No walkable tile available for entity {entity_id}")
            }
            Self::CatalogParse { path, source } => {
                write!(f, "Failed to parse catalog '{}': {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CatalogParse { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for map results
pub type Result<T> = std::result::Result<T, MapError>;

/// Attaches a path and operation name to I/O failures
pub trait WithPath<T> {
    /// Convert an I/O error into [`MapError::FileSystem`] for `path`
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path and operation applied
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T>;
}

impl<T> WithPath<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T> {
        self.map_err(|source| MapError::FileSystem {
            path: path.to_path_buf(),
            operation,
            source,
        })
    }
}

impl From<std::io::Error> for MapError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MapError {
    MapError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid board error
pub fn invalid_board(reason: &impl ToString) -> MapError {
    MapError::InvalidBoard {
        reason: reason.to_string(),
    }
}
