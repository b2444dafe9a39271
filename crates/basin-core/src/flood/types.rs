use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ndarray::{Array, Dimension};

/// Flooding phase, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FloodStage {
    Seeding,
    Flooding,
    Extracting,
}

impl std::fmt::Display for FloodStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Seeding => write!(f, "Seeding markers"),
            Self::Flooding => write!(f, "Flooding"),
            Self::Extracting => write!(f, "Extracting labels"),
        }
    }
}

/// Thread-safe progress observer for a flood run.
///
/// All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new stage has started.
    fn begin_stage(&self, _stage: FloodStage) {}

    /// Approximate completed fraction of the current stage, in [0, 1].
    ///
    /// During flooding this is `(priority - min) / (max - min)` over the
    /// intensity range, which stays meaningful when dams stop propagation early.
    fn progress(&self, _fraction: f32) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter, used when the caller passes none.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}

/// Cooperative cancellation flag shared between a flood run and its caller.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Counters collected over one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FloodReport {
    /// Marker cells copied into the label grid.
    pub seeds: usize,
    /// Candidates popped from the queue.
    pub pops: usize,
    /// Cells labeled by flooding (markers excluded).
    pub labeled: usize,
    /// Cells turned into watershed dams.
    pub dams: usize,
}

/// Label grid plus run counters.
#[derive(Clone, Debug)]
pub struct FloodOutput<D: Dimension> {
    /// Region ids; 0 marks background and dams.
    pub labels: Array<u32, D>,
    /// Dam cells, present only when dams were computed.
    pub dams: Option<Array<bool, D>>,
    pub report: FloodReport,
}
