//! Marker-controlled watershed flooding.
//!
//! Regions grow from labeled markers in ascending priority order. A popped
//! cell joins the region that reached it, or becomes a dam when dams are
//! enabled and it touches two or more regions. Growth can be confined to a
//! mask and biased toward compact regions with a distance penalty.

mod config;
mod engine;
mod seeding;
mod types;

use ndarray::{Array2, Array3, ArrayView, ArrayView3, Axis, Dimension, Ix2, Ix3};
use num_traits::AsPrimitive;
use tracing::info;

use crate::compact::Compactness;
use crate::error::{BasinError, Result};
use crate::extract::{extract_dams, extract_labels};
use crate::grid::FloodGrid;
use crate::queue::FloodQueue;
use crate::topology::{Connectivity, Neighborhood};

pub use config::WatershedConfig;
pub use types::{CancelToken, FloodOutput, FloodReport, FloodStage, NoOpReporter, ProgressReporter};

use engine::{FloodEngine, LevelProgress};
use seeding::seed;

/// Flood `intensity` from the positive labels in `markers`.
///
/// All grids must share one shape, 2D or 3D. Cells outside `mask` (when given)
/// are never labeled. The output holds the marker ids grown over the grid,
/// with 0 for background and dam cells.
///
/// `cancel` is polled once per queue pop; a cancelled run returns
/// [`BasinError::Cancelled`] and no labels.
pub fn flood<T, D>(
    intensity: ArrayView<'_, T, D>,
    markers: ArrayView<'_, u32, D>,
    mask: Option<ArrayView<'_, bool, D>>,
    config: &WatershedConfig,
    cancel: &CancelToken,
    reporter: Option<&dyn ProgressReporter>,
) -> Result<FloodOutput<D>>
where
    T: AsPrimitive<f64> + Sync,
    D: Dimension,
{
    check_shape("markers", intensity.shape(), markers.shape())?;
    if let Some(mask) = &mask {
        check_shape("mask", intensity.shape(), mask.shape())?;
    }

    let ndim = intensity.ndim();
    let connectivity = match config.connectivity {
        Some(connectivity) => connectivity,
        None => Connectivity::default_for(ndim).ok_or(BasinError::InvalidConnectivity {
            connectivity: 0,
            ndim,
        })?,
    };
    connectivity.validate(ndim)?;
    let compactness = Compactness::new(config.compactness)?;
    let reporter = reporter.unwrap_or(&NoOpReporter);

    let out_dim = intensity.raw_dim();
    let intensity = as_volume(intensity)?;
    let markers = as_volume(markers)?;
    let mask = mask.map(as_volume).transpose()?;

    let (planes, rows, cols) = intensity.dim();
    let neighborhood = Neighborhood::new([planes, rows, cols], connectivity);
    let parallel = intensity.len() >= config.parallel_threshold;

    info!(
        shape = ?out_dim.slice(),
        %connectivity,
        compute_dams = config.compute_dams,
        compactness = compactness.weight(),
        "Starting watershed"
    );

    reporter.begin_stage(FloodStage::Seeding);
    let seeding = seed(intensity, markers, mask, neighborhood, compactness, parallel);
    reporter.finish_stage();
    info!(
        seeds = seeding.seeds,
        candidates = seeding.candidates.len(),
        parallel,
        "Seeding complete"
    );

    if cancel.is_cancelled() {
        return Err(BasinError::Cancelled);
    }

    let (min, max) = intensity_range(intensity, mask);
    let mut report = FloodReport {
        seeds: seeding.seeds,
        ..Default::default()
    };
    let mut engine = FloodEngine {
        grid: FloodGrid::new(intensity, mask, seeding.states)?,
        neighborhood,
        compactness,
        compute_dams: config.compute_dams,
        queue: FloodQueue::with_capacity(seeding.candidates.len()),
    };
    engine.enqueue_seeds(seeding.candidates)?;

    reporter.begin_stage(FloodStage::Flooding);
    engine.run(
        cancel,
        reporter,
        &mut LevelProgress::new(min, max),
        &mut report,
    )?;
    reporter.finish_stage();
    info!(
        pops = report.pops,
        labeled = report.labeled,
        dams = report.dams,
        "Flooding complete"
    );

    reporter.begin_stage(FloodStage::Extracting);
    let states = engine.grid.into_states();
    let dams = if config.compute_dams {
        Some(extract_dams(&states).into_shape_with_order(out_dim.clone())?)
    } else {
        None
    };
    let labels = extract_labels(&states).into_shape_with_order(out_dim)?;
    reporter.finish_stage();

    Ok(FloodOutput {
        labels,
        dams,
        report,
    })
}

/// Run [`flood`] on a 2D image without cancellation or progress reporting.
pub fn watershed_2d<T>(
    intensity: &Array2<T>,
    markers: &Array2<u32>,
    mask: Option<&Array2<bool>>,
    config: &WatershedConfig,
) -> Result<Array2<u32>>
where
    T: AsPrimitive<f64> + Sync,
{
    flood(
        intensity.view(),
        markers.view(),
        mask.map(|m| m.view()),
        config,
        &CancelToken::new(),
        None,
    )
    .map(|output| output.labels)
}

/// Run [`flood`] on a 3D volume without cancellation or progress reporting.
pub fn watershed_3d<T>(
    intensity: &Array3<T>,
    markers: &Array3<u32>,
    mask: Option<&Array3<bool>>,
    config: &WatershedConfig,
) -> Result<Array3<u32>>
where
    T: AsPrimitive<f64> + Sync,
{
    flood(
        intensity.view(),
        markers.view(),
        mask.map(|m| m.view()),
        config,
        &CancelToken::new(),
        None,
    )
    .map(|output| output.labels)
}

fn check_shape(what: &'static str, expected: &[usize], actual: &[usize]) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(BasinError::DimensionMismatch {
            what,
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        })
    }
}

/// View a 2D or 3D grid as `[plane, row, col]`; 2D grids get a single plane.
pub(crate) fn as_volume<'a, A, D: Dimension>(
    view: ArrayView<'a, A, D>,
) -> Result<ArrayView3<'a, A>> {
    match view.ndim() {
        2 => Ok(view.into_dimensionality::<Ix2>()?.insert_axis(Axis(0))),
        3 => Ok(view.into_dimensionality::<Ix3>()?),
        ndim => Err(BasinError::InvalidParameter(format!(
            "expected a 2D or 3D grid, got {ndim}D"
        ))),
    }
}

/// Min and max intensity over the cells inside the mask.
fn intensity_range<T: AsPrimitive<f64>>(
    intensity: ArrayView3<'_, T>,
    mask: Option<ArrayView3<'_, bool>>,
) -> (f64, f64) {
    intensity
        .indexed_iter()
        .filter(|((p, r, c), _)| mask.map_or(true, |m| m[[*p, *r, *c]]))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, &v)| {
            let v: f64 = v.as_();
            (lo.min(v), hi.max(v))
        })
}
