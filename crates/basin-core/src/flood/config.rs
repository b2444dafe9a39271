use serde::{Deserialize, Serialize};

use crate::consts::PARALLEL_CELL_THRESHOLD;
use crate::topology::Connectivity;

/// Parameters for one marker-controlled watershed run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WatershedConfig {
    /// Neighbor topology. `None` picks 4 for 2D grids and 6 for 3D grids.
    #[serde(default)]
    pub connectivity: Option<Connectivity>,
    /// Leave one-cell-wide unlabeled dams where regions meet.
    #[serde(default = "default_compute_dams")]
    pub compute_dams: bool,
    /// Distance-to-seed weight for compact watershed (0 disables it).
    #[serde(default)]
    pub compactness: f64,
    /// Minimum cell count to seed in parallel.
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

fn default_compute_dams() -> bool {
    true
}
fn default_parallel_threshold() -> usize {
    PARALLEL_CELL_THRESHOLD
}

impl Default for WatershedConfig {
    fn default() -> Self {
        Self {
            connectivity: None,
            compute_dams: true,
            compactness: 0.0,
            parallel_threshold: PARALLEL_CELL_THRESHOLD,
        }
    }
}

impl WatershedConfig {
    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = Some(connectivity);
        self
    }

    pub fn with_dams(mut self, compute_dams: bool) -> Self {
        self.compute_dams = compute_dams;
        self
    }

    pub fn with_compactness(mut self, compactness: f64) -> Self {
        self.compactness = compactness;
        self
    }
}
