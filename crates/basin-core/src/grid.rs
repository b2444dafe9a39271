//! Per-run grid access: intensity lookup, mask lookup and the cell state grid.

use ndarray::{Array3, ArrayView3};
use num_traits::AsPrimitive;

use crate::consts::BACKGROUND_LABEL;
use crate::error::{BasinError, Result};
use crate::topology::Coord;

/// Flooding state of a single cell.
///
/// Legal transitions are `Unvisited -> Queued -> Labeled | Watershed`, plus
/// `Unvisited -> Labeled` for marker cells during seeding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CellState {
    #[default]
    Unvisited,
    /// Already in the queue; never enqueue again.
    Queued,
    Labeled(u32),
    /// Dam cell between two or more regions.
    Watershed,
}

impl CellState {
    /// Public output value: the label id, or 0 for every other state.
    pub fn label(self) -> u32 {
        match self {
            Self::Labeled(id) => id,
            _ => BACKGROUND_LABEL,
        }
    }
}

/// Grid accessor over the three parallel input grids plus the mutable state grid.
///
/// All inputs are `[plane, row, col]` views of identical shape; 2D inputs are
/// single-plane volumes. Every accessor rejects out-of-range coordinates with
/// [`BasinError::OutOfBounds`].
pub struct FloodGrid<'a, T> {
    intensity: ArrayView3<'a, T>,
    mask: Option<ArrayView3<'a, bool>>,
    states: Array3<CellState>,
}

impl<'a, T> FloodGrid<'a, T>
where
    T: AsPrimitive<f64>,
{
    pub fn new(
        intensity: ArrayView3<'a, T>,
        mask: Option<ArrayView3<'a, bool>>,
        states: Array3<CellState>,
    ) -> Result<Self> {
        let shape = intensity.shape().to_vec();
        if states.shape() != shape.as_slice() {
            return Err(BasinError::DimensionMismatch {
                what: "state grid",
                expected: shape,
                actual: states.shape().to_vec(),
            });
        }
        if let Some(mask) = &mask {
            if mask.shape() != shape.as_slice() {
                return Err(BasinError::DimensionMismatch {
                    what: "mask",
                    expected: shape,
                    actual: mask.shape().to_vec(),
                });
            }
        }
        Ok(Self {
            intensity,
            mask,
            states,
        })
    }

    /// Grid shape as `[planes, rows, cols]`.
    pub fn shape(&self) -> [usize; 3] {
        let (p, r, c) = self.intensity.dim();
        [p, r, c]
    }

    pub fn value_at(&self, coord: Coord) -> Result<f64> {
        self.intensity
            .get(coord)
            .map(|&v| v.as_())
            .ok_or(BasinError::OutOfBounds { coord })
    }

    pub fn state_at(&self, coord: Coord) -> Result<CellState> {
        self.states
            .get(coord)
            .copied()
            .ok_or(BasinError::OutOfBounds { coord })
    }

    /// Current public label of a cell (0 unless `Labeled`).
    pub fn label_at(&self, coord: Coord) -> Result<u32> {
        self.state_at(coord).map(CellState::label)
    }

    /// Always true when no mask was given.
    pub fn in_mask(&self, coord: Coord) -> Result<bool> {
        match &self.mask {
            Some(mask) => mask
                .get(coord)
                .copied()
                .ok_or(BasinError::OutOfBounds { coord }),
            None => {
                self.state_at(coord)?;
                Ok(true)
            }
        }
    }

    pub fn mark_queued(&mut self, coord: Coord) -> Result<()> {
        self.transition(coord, CellState::Queued)
    }

    pub fn set_label(&mut self, coord: Coord, label: u32) -> Result<()> {
        if label == BACKGROUND_LABEL {
            return Err(BasinError::InvariantViolation(format!(
                "label 0 assigned to {coord:?}"
            )));
        }
        self.transition(coord, CellState::Labeled(label))
    }

    pub fn set_watershed(&mut self, coord: Coord) -> Result<()> {
        self.transition(coord, CellState::Watershed)
    }

    fn transition(&mut self, coord: Coord, next: CellState) -> Result<()> {
        let cell = self
            .states
            .get_mut(coord)
            .ok_or(BasinError::OutOfBounds { coord })?;
        let legal = matches!(
            (*cell, next),
            (CellState::Unvisited, CellState::Queued)
                | (CellState::Unvisited | CellState::Queued, CellState::Labeled(_))
                | (CellState::Queued, CellState::Watershed)
        );
        if !legal {
            return Err(BasinError::InvariantViolation(format!(
                "illegal transition {:?} -> {:?} at {:?}",
                *cell, next, coord
            )));
        }
        *cell = next;
        Ok(())
    }

    /// Consume the accessor, handing back the final state grid.
    pub fn into_states(self) -> Array3<CellState> {
        self.states
    }
}
