//! Conversion of the final state grid into public label grids.

use ndarray::{Array3, Zip};

use crate::grid::CellState;

/// `Labeled(id) -> id`; `Watershed` and `Unvisited` both become 0.
pub fn extract_labels(states: &Array3<CellState>) -> Array3<u32> {
    states.map(|state| state.label())
}

/// Boolean grid of the watershed (dam) cells.
pub fn extract_dams(states: &Array3<CellState>) -> Array3<bool> {
    let mut dams = Array3::from_elem(states.raw_dim(), false);
    Zip::from(&mut dams)
        .and(states)
        .for_each(|dam, &state| *dam = state == CellState::Watershed);
    dams
}
