pub mod compact;
pub mod consts;
pub mod error;
pub mod extract;
pub mod flood;
pub mod grid;
pub mod io;
pub mod markers;
pub mod queue;
pub mod regions;
pub mod topology;

pub use error::{BasinError, Result};
pub use flood::{
    flood, watershed_2d, watershed_3d, CancelToken, FloodOutput, FloodReport, FloodStage,
    ProgressReporter, WatershedConfig,
};
pub use topology::Connectivity;
