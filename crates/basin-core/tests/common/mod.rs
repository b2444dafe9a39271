#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use basin_core::flood::{FloodStage, ProgressReporter};
use basin_core::topology::{Connectivity, Neighborhood};
use ndarray::{Array2, Array3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Build a 2D grid from a function of (row, col).
pub fn grid2<T>(rows: usize, cols: usize, f: impl Fn(usize, usize) -> T) -> Array2<T> {
    Array2::from_shape_fn((rows, cols), |(r, c)| f(r, c))
}

/// Marker grid with the given `(row, col, label)` seeds.
pub fn markers2(rows: usize, cols: usize, seeds: &[(usize, usize, u32)]) -> Array2<u32> {
    let mut markers = Array2::<u32>::zeros((rows, cols));
    for &(r, c, label) in seeds {
        markers[[r, c]] = label;
    }
    markers
}

/// Marker volume with the given `(plane, row, col, label)` seeds.
pub fn markers3(shape: (usize, usize, usize), seeds: &[(usize, usize, usize, u32)]) -> Array3<u32> {
    let mut markers = Array3::<u32>::zeros(shape);
    for &(p, r, c, label) in seeds {
        markers[[p, r, c]] = label;
    }
    markers
}

/// Seeded pseudo-random intensities in [0, 1).
pub fn noise2(rows: usize, cols: usize, seed: u64) -> Array2<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array2::from_shape_fn((rows, cols), |_| rng.random::<f32>())
}

/// Assert that every labeled cell reaches a marker cell of the same label
/// through same-labeled cells.
pub fn assert_reachable(labels: &Array3<u32>, markers: &Array3<u32>, connectivity: Connectivity) {
    let (p, r, c) = labels.dim();
    let neighborhood = Neighborhood::new([p, r, c], connectivity);
    let mut reached = Array3::from_elem((p, r, c), false);
    let mut queue = VecDeque::new();

    for ((p, r, c), &m) in markers.indexed_iter() {
        if m > 0 && labels[[p, r, c]] == m {
            reached[[p, r, c]] = true;
            queue.push_back([p, r, c]);
        }
    }
    while let Some(coord) = queue.pop_front() {
        let label = labels[coord];
        for n in neighborhood.neighbors(coord) {
            if !reached[n] && labels[n] == label {
                reached[n] = true;
                queue.push_back(n);
            }
        }
    }

    for ((p, r, c), &label) in labels.indexed_iter() {
        if label > 0 {
            assert!(
                reached[[p, r, c]],
                "cell {:?} labeled {} is not connected to its marker",
                (p, r, c),
                label
            );
        }
    }
}

/// Progress reporter that records every call.
#[derive(Default)]
pub struct RecordingReporter {
    pub stages: Mutex<Vec<FloodStage>>,
    pub fractions: Mutex<Vec<f32>>,
    pub finished: Mutex<usize>,
}

impl ProgressReporter for RecordingReporter {
    fn begin_stage(&self, stage: FloodStage) {
        self.stages.lock().unwrap().push(stage);
    }

    fn progress(&self, fraction: f32) {
        self.fractions.lock().unwrap().push(fraction);
    }

    fn finish_stage(&self) {
        *self.finished.lock().unwrap() += 1;
    }
}
