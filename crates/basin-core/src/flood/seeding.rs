use ndarray::{Array3, ArrayView3, Zip};
use num_traits::AsPrimitive;
use rayon::prelude::*;

use crate::compact::Compactness;
use crate::grid::CellState;
use crate::queue::Candidate;
use crate::topology::Neighborhood;

/// Initial state grid and first-ring candidates.
pub(super) struct Seeding {
    pub states: Array3<CellState>,
    /// Candidates in raster order of their coordinates; each cell appears once.
    pub candidates: Vec<Candidate>,
    pub seeds: usize,
}

/// Copy in-mask markers into a fresh state grid and collect every unlabeled
/// in-mask cell that touches a marker.
///
/// Each row of the grid is scanned independently, so with `parallel` set the
/// rows run on the Rayon pool and their candidate lists are concatenated in
/// row order. The result is identical either way.
pub(super) fn seed<T>(
    intensity: ArrayView3<'_, T>,
    markers: ArrayView3<'_, u32>,
    mask: Option<ArrayView3<'_, bool>>,
    neighborhood: Neighborhood,
    compactness: Compactness,
    parallel: bool,
) -> Seeding
where
    T: AsPrimitive<f64> + Sync,
{
    let mut states = Array3::<CellState>::default(markers.raw_dim());

    let init = |(p, r, c): (usize, usize, usize), state: &mut CellState, &marker: &u32| {
        let inside = mask.map_or(true, |m| m[[p, r, c]]);
        if marker > 0 && inside {
            *state = CellState::Labeled(marker);
        }
    };
    if parallel {
        Zip::indexed(&mut states).and(&markers).par_for_each(init);
    } else {
        Zip::indexed(&mut states).and(&markers).for_each(init);
    }

    let seeds = states
        .iter()
        .filter(|s| matches!(s, CellState::Labeled(_)))
        .count();

    let [planes, rows, cols] = neighborhood.shape();
    let states_ref = &states;
    let scan_row = |index: usize| -> Vec<Candidate> {
        let (plane, row) = (index / rows, index % rows);
        let mut found = Vec::new();
        for col in 0..cols {
            let coord = [plane, row, col];
            if states_ref[coord] != CellState::Unvisited || !mask.map_or(true, |m| m[coord]) {
                continue;
            }
            let raw: f64 = intensity[coord].as_();
            // Nearest marker neighbor wins; ties keep the first in enumeration order.
            let mut best: Option<Candidate> = None;
            for n in neighborhood.neighbors(coord) {
                if let CellState::Labeled(label) = states_ref[n] {
                    let increment = compactness.increment(0.0, n, coord);
                    let priority = raw + increment;
                    if best.map_or(true, |b| priority < b.priority) {
                        best = Some(Candidate::new(coord, priority, raw, increment, label, n));
                    }
                }
            }
            found.extend(best);
        }
        found
    };

    let row_count = planes * rows;
    let per_row: Vec<Vec<Candidate>> = if parallel {
        (0..row_count).into_par_iter().map(scan_row).collect()
    } else {
        (0..row_count).map(scan_row).collect()
    };
    let candidates = per_row.into_iter().flatten().collect();

    Seeding {
        states,
        candidates,
        seeds,
    }
}
