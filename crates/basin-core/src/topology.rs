//! Grid adjacency: connectivity descriptors and the in-bounds neighbor iterator.
//!
//! Coordinates are `[plane, row, col]`. 2D grids are handled as volumes with a
//! single plane, so the 2D connectivities only ever step within plane 0.

use serde::{Deserialize, Serialize};

use crate::error::{BasinError, Result};

/// A cell coordinate: `[plane, row, col]`.
pub type Coord = [usize; 3];

/// Neighbor topology used for flooding and region adjacency.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Connectivity {
    /// 2D, edge-adjacent neighbors.
    Four,
    /// 2D, edge- and corner-adjacent neighbors.
    Eight,
    /// 3D, face-adjacent neighbors.
    Six,
    /// 3D, face-, edge- and corner-adjacent neighbors.
    TwentySix,
}

const FOUR_OFFSETS: [[isize; 3]; 4] = [[0, -1, 0], [0, 0, -1], [0, 0, 1], [0, 1, 0]];

const EIGHT_OFFSETS: [[isize; 3]; 8] = [
    [0, -1, -1],
    [0, -1, 0],
    [0, -1, 1],
    [0, 0, -1],
    [0, 0, 1],
    [0, 1, -1],
    [0, 1, 0],
    [0, 1, 1],
];

const SIX_OFFSETS: [[isize; 3]; 6] = [
    [-1, 0, 0],
    [0, -1, 0],
    [0, 0, -1],
    [0, 0, 1],
    [0, 1, 0],
    [1, 0, 0],
];

const TWENTY_SIX_OFFSETS: [[isize; 3]; 26] = {
    let mut offsets = [[0isize; 3]; 26];
    let mut i = 0;
    let mut dp = -1;
    while dp <= 1 {
        let mut dr = -1;
        while dr <= 1 {
            let mut dc = -1;
            while dc <= 1 {
                if dp != 0 || dr != 0 || dc != 0 {
                    offsets[i] = [dp, dr, dc];
                    i += 1;
                }
                dc += 1;
            }
            dr += 1;
        }
        dp += 1;
    }
    offsets
};

impl Connectivity {
    /// Parse the conventional integer spelling (4, 8, 6 or 26) for a grid of
    /// the given dimensionality.
    pub fn from_count(count: u8, ndim: usize) -> Result<Self> {
        let connectivity = match count {
            4 => Self::Four,
            8 => Self::Eight,
            6 => Self::Six,
            26 => Self::TwentySix,
            _ => {
                return Err(BasinError::InvalidConnectivity {
                    connectivity: count,
                    ndim,
                })
            }
        };
        connectivity.validate(ndim)?;
        Ok(connectivity)
    }

    /// Default connectivity for a dimensionality: 4 in 2D, 6 in 3D.
    pub fn default_for(ndim: usize) -> Option<Self> {
        match ndim {
            2 => Some(Self::Four),
            3 => Some(Self::Six),
            _ => None,
        }
    }

    /// Number of neighbors of an interior cell.
    pub fn count(self) -> u8 {
        match self {
            Self::Four => 4,
            Self::Eight => 8,
            Self::Six => 6,
            Self::TwentySix => 26,
        }
    }

    /// Dimensionality this connectivity belongs to.
    pub fn ndim(self) -> usize {
        match self {
            Self::Four | Self::Eight => 2,
            Self::Six | Self::TwentySix => 3,
        }
    }

    /// Fail with `InvalidConnectivity` unless this connectivity is legal for `ndim`.
    pub fn validate(self, ndim: usize) -> Result<()> {
        if self.ndim() == ndim {
            Ok(())
        } else {
            Err(BasinError::InvalidConnectivity {
                connectivity: self.count(),
                ndim,
            })
        }
    }

    /// Relative `[plane, row, col]` steps, in raster order.
    pub fn offsets(self) -> &'static [[isize; 3]] {
        match self {
            Self::Four => &FOUR_OFFSETS,
            Self::Eight => &EIGHT_OFFSETS,
            Self::Six => &SIX_OFFSETS,
            Self::TwentySix => &TWENTY_SIX_OFFSETS,
        }
    }
}

impl std::fmt::Display for Connectivity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-connectivity", self.count())
    }
}

/// Enumerates the in-bounds neighbors of a cell for a fixed grid shape.
///
/// Out-of-bounds neighbors are omitted rather than reported. Enumeration order
/// is the raster order of [`Connectivity::offsets`] and is the same on every
/// call for the same coordinate.
#[derive(Clone, Copy, Debug)]
pub struct Neighborhood {
    shape: [usize; 3],
    offsets: &'static [[isize; 3]],
}

impl Neighborhood {
    pub fn new(shape: [usize; 3], connectivity: Connectivity) -> Self {
        Self {
            shape,
            offsets: connectivity.offsets(),
        }
    }

    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    /// Maximum number of neighbors a cell can have.
    pub fn max_neighbors(&self) -> usize {
        self.offsets.len()
    }

    /// In-bounds neighbors of `coord`.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> {
        let shape = self.shape;
        self.offsets
            .iter()
            .filter_map(move |offset| step(coord, *offset, shape))
    }

    /// In-bounds neighbors that precede `coord` in raster order.
    ///
    /// The offset tables are symmetric and raster-ordered, so the first half
    /// of each table points backward.
    pub fn backward_neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> {
        let shape = self.shape;
        self.offsets[..self.offsets.len() / 2]
            .iter()
            .filter_map(move |offset| step(coord, *offset, shape))
    }
}

fn step(coord: Coord, offset: [isize; 3], shape: [usize; 3]) -> Option<Coord> {
    let mut out = [0usize; 3];
    for axis in 0..3 {
        let moved = coord[axis].checked_add_signed(offset[axis])?;
        if moved >= shape[axis] {
            return None;
        }
        out[axis] = moved;
    }
    Some(out)
}
