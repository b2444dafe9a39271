use std::collections::BTreeMap;

use ndarray::{Array, ArrayView, Dimension, Zip};

use crate::consts::BACKGROUND_LABEL;
use crate::error::{BasinError, Result};
use crate::flood::as_volume;
use crate::topology::{Connectivity, Coord, Neighborhood};

/// Statistics for a single labeled region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionStats {
    /// Region id.
    pub label: u32,
    /// Number of cells in the region.
    pub area: usize,
    /// Bounding box corner with the smallest `[plane, row, col]`.
    pub min: Coord,
    /// Bounding box corner with the largest `[plane, row, col]`.
    pub max: Coord,
}

/// Per-region statistics of a label grid, sorted by label. Label 0 is skipped.
pub fn region_stats<D: Dimension>(labels: ArrayView<'_, u32, D>) -> Result<Vec<RegionStats>> {
    let volume = as_volume(labels)?;
    let mut stats = BTreeMap::<u32, RegionStats>::new();

    for ((p, r, c), &label) in volume.indexed_iter() {
        if label == BACKGROUND_LABEL {
            continue;
        }
        let coord = [p, r, c];
        let entry = stats.entry(label).or_insert(RegionStats {
            label,
            area: 0,
            min: coord,
            max: coord,
        });
        entry.area += 1;
        for axis in 0..3 {
            entry.min[axis] = entry.min[axis].min(coord[axis]);
            entry.max[axis] = entry.max[axis].max(coord[axis]);
        }
    }

    Ok(stats.into_values().collect())
}

/// Number of cells carrying the reserved 0 label.
pub fn background_count<D: Dimension>(labels: ArrayView<'_, u32, D>) -> usize {
    labels.iter().filter(|&&l| l == BACKGROUND_LABEL).count()
}

/// Boolean grid of watershed-line cells in a flooded label grid.
///
/// A dam is a 0-labeled cell inside the mask that touches at least one
/// labeled cell. Unreached in-mask cells never touch a labeled cell, so they
/// are not reported.
pub fn dam_mask<D: Dimension>(
    labels: ArrayView<'_, u32, D>,
    mask: Option<ArrayView<'_, bool, D>>,
    connectivity: Connectivity,
) -> Result<Array<bool, D>> {
    connectivity.validate(labels.ndim())?;
    if let Some(mask) = &mask {
        if mask.shape() != labels.shape() {
            return Err(BasinError::DimensionMismatch {
                what: "mask",
                expected: labels.shape().to_vec(),
                actual: mask.shape().to_vec(),
            });
        }
    }
    let out_dim = labels.raw_dim();
    let volume = as_volume(labels)?;
    let mask = mask.map(as_volume).transpose()?;
    let (p, r, c) = volume.dim();
    let neighborhood = Neighborhood::new([p, r, c], connectivity);

    let mut dams = ndarray::Array3::from_elem((p, r, c), false);
    Zip::indexed(&mut dams)
        .and(&volume)
        .for_each(|(p, r, c), dam, &label| {
            let coord = [p, r, c];
            let inside = mask.map_or(true, |m| m[coord]);
            *dam = label == BACKGROUND_LABEL
                && inside
                && neighborhood
                    .neighbors(coord)
                    .any(|n| volume[n] != BACKGROUND_LABEL);
        });
    Ok(dams.into_shape_with_order(out_dim)?)
}
