//! MAP-Elites archive: one elite per cell of a discretised fitness plane
//!
//! The X and Y axis values of a candidate, scaled into `[0, 1]`, pick its
//! cell. A newcomer replaces the occupant only when its X+Y sum is strictly
//! larger. Every insertion attempt counts as a visit of its cell, whatever
//! the outcome.

use ndarray::Array2;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::board::candidate::MapCandidate;
use crate::evolution::params::FitnessAxis;
use crate::io::configuration::BUCKET_SNAP_EPSILON;
use crate::io::error::{Result, invalid_parameter};

/// Column and row of an archive cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellCoord {
    /// Bucket along the X axis
    pub x: usize,
    /// Bucket along the Y axis
    pub y: usize,
}

/// Bucket of `value` among `cells` equal slices of `[0, 1]`
///
/// Buckets are lower-inclusive, the last one also holds `1.0`, and values
/// outside the unit range clamp to the nearest end. Scaled values within a
/// rounding error of a boundary snap onto it, so `0.3` over ten cells lands
/// in bucket 3.
pub fn bucket(value: f64, cells: usize) -> usize {
    if cells == 0 {
        return 0;
    }
    let value = if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    };
    let scaled = value * cells as f64;
    let nearest = scaled.round();
    let snapped = if (scaled - nearest).abs() < BUCKET_SNAP_EPSILON {
        nearest
    } else {
        scaled
    };
    (snapped.floor() as usize).min(cells - 1)
}

/// Result of offering a candidate to the archive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The cell was empty
    Inserted(CellCoord),
    /// The candidate beat the occupant
    Replaced(CellCoord),
    /// The occupant was kept
    Rejected(CellCoord),
}

impl InsertOutcome {
    /// Cell the candidate was offered to
    pub const fn cell(self) -> CellCoord {
        match self {
            Self::Inserted(cell) | Self::Replaced(cell) | Self::Rejected(cell) => cell,
        }
    }
}

/// Grid of elites indexed by two fitness axes
#[derive(Debug, Clone)]
pub struct Archive {
    x_axis: FitnessAxis,
    y_axis: FitnessAxis,
    /// `[y, x]`
    elites: Array2<Option<MapCandidate>>,
    /// `[y, x]`
    hits: Array2<u64>,
}

impl Archive {
    /// Create an empty archive of `width × height` cells
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero
    pub fn new(
        width: usize,
        height: usize,
        x_axis: FitnessAxis,
        y_axis: FitnessAxis,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(invalid_parameter(
                "archive dimensions",
                &format!("{width}x{height}"),
                &"must be positive",
            ));
        }
        Ok(Self {
            x_axis,
            y_axis,
            elites: Array2::from_elem((height, width), None),
            hits: Array2::zeros((height, width)),
        })
    }

    /// Cells along the X axis
    pub fn width(&self) -> usize {
        self.elites.ncols()
    }

    /// Cells along the Y axis
    pub fn height(&self) -> usize {
        self.elites.nrows()
    }

    /// Axis indexing the columns
    pub const fn x_axis(&self) -> FitnessAxis {
        self.x_axis
    }

    /// Axis indexing the rows
    pub const fn y_axis(&self) -> FitnessAxis {
        self.y_axis
    }

    /// Total number of cells
    pub fn capacity(&self) -> usize {
        self.elites.len()
    }

    /// Number of occupied cells
    pub fn len(&self) -> usize {
        self.elites.iter().filter(|cell| cell.is_some()).count()
    }

    /// Whether no cell holds an elite
    pub fn is_empty(&self) -> bool {
        self.elites.iter().all(Option::is_none)
    }

    /// Occupied share of the archive, in `[0, 1]`
    pub fn coverage(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }

    /// Cell a scored candidate belongs to
    pub fn cell_of(&self, candidate: &MapCandidate) -> CellCoord {
        CellCoord {
            x: bucket(self.x_axis.fraction(candidate), self.width()),
            y: bucket(self.y_axis.fraction(candidate), self.height()),
        }
    }

    /// Combined X+Y value used to compare a newcomer with an occupant
    pub fn fitness(&self, candidate: &MapCandidate) -> f64 {
        self.x_axis.value(candidate) + self.y_axis.value(candidate)
    }

    /// Offer a scored candidate to its cell
    pub fn insert(&mut self, candidate: MapCandidate) -> InsertOutcome {
        let cell = self.cell_of(&candidate);
        let newcomer = self.fitness(&candidate);
        let incumbent = self.get(cell).map(|occupant| self.fitness(occupant));

        if let Some(count) = self.hits.get_mut((cell.y, cell.x)) {
            *count += 1;
        }

        let outcome = match incumbent {
            None => InsertOutcome::Inserted(cell),
            Some(current) if newcomer > current => InsertOutcome::Replaced(cell),
            Some(_) => return InsertOutcome::Rejected(cell),
        };
        if let Some(slot) = self.elites.get_mut((cell.y, cell.x)) {
            *slot = Some(candidate);
        }
        outcome
    }

    /// Elite stored at `cell`
    pub fn get(&self, cell: CellCoord) -> Option<&MapCandidate> {
        self.elites.get((cell.y, cell.x)).and_then(Option::as_ref)
    }

    /// Insertion attempts recorded for `cell`
    pub fn hits(&self, cell: CellCoord) -> u64 {
        self.hits.get((cell.y, cell.x)).copied().unwrap_or(0)
    }

    /// Occupied cells in row-major order
    pub fn occupied(&self) -> impl Iterator<Item = (CellCoord, &MapCandidate)> {
        self.elites
            .indexed_iter()
            .filter_map(|((y, x), slot)| slot.as_ref().map(|elite| (CellCoord { x, y }, elite)))
    }

    /// Uniformly chosen elite, `None` while the archive is empty
    pub fn random_elite<R: Rng>(&self, rng: &mut R) -> Option<&MapCandidate> {
        let cells: Vec<CellCoord> = self.occupied().map(|(cell, _)| cell).collect();
        cells.choose(rng).and_then(|&cell| self.get(cell))
    }

    /// Elite with the largest X+Y value, earliest cell first on ties
    pub fn best(&self) -> Option<&MapCandidate> {
        self.occupied()
            .map(|(_, elite)| elite)
            .fold(None, |best: Option<&MapCandidate>, elite| match best {
                Some(current) if self.fitness(current) >= self.fitness(elite) => Some(current),
                _ => Some(elite),
            })
    }
}
