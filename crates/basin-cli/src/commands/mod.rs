pub mod config;
pub mod markers;
pub mod regions;
pub mod segment;

use std::path::Path;

use anyhow::{Context, Result};
use basin_core::io::image_io::{
    load_intensity, load_labels, load_mask, save_label_colors, save_labels,
};
use basin_core::io::volume::{load_volume, save_volume_labels};
use basin_core::topology::Connectivity;
use ndarray::{Array, ArrayD, Axis, Dimension, Ix2, Ix3};

/// Dimensionality of an input path: slice directories are volumes.
pub fn input_ndim(path: &Path) -> usize {
    if path.is_dir() {
        3
    } else {
        2
    }
}

/// Resolve a `--connectivity` count for an input of the given dimensionality.
pub fn resolve_connectivity(count: Option<u8>, ndim: usize) -> Result<Connectivity> {
    let connectivity = match count {
        Some(count) => Connectivity::from_count(count, ndim)?,
        None => Connectivity::default_for(ndim)
            .with_context(|| format!("No default connectivity for {ndim}D input"))?,
    };
    Ok(connectivity)
}

pub fn read_intensity(path: &Path) -> Result<ArrayD<f32>> {
    read_grid(path, load_intensity)
}

pub fn read_labels(path: &Path) -> Result<ArrayD<u32>> {
    read_grid(path, load_labels)
}

pub fn read_mask(path: &Path) -> Result<ArrayD<bool>> {
    read_grid(path, load_mask)
}

/// Load a single image or a slice directory as a dynamic-dimensional grid.
fn read_grid<T, F>(path: &Path, load: F) -> Result<ArrayD<T>>
where
    T: Clone,
    F: Fn(&Path) -> basin_core::Result<ndarray::Array2<T>>,
{
    let grid = if path.is_dir() {
        load_volume(path, load)
            .with_context(|| format!("Failed to load volume {}", path.display()))?
            .into_dyn()
    } else {
        load(path)
            .with_context(|| format!("Failed to load image {}", path.display()))?
            .into_dyn()
    };
    Ok(grid)
}

/// Shape of a dynamic grid, for printing.
pub fn shape_string(shape: &[usize]) -> String {
    shape
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join("x")
}

/// Reinterpret a 2D or 3D dynamic grid with a fixed dimensionality.
pub fn fixed<T, D: Dimension>(grid: ArrayD<T>) -> Result<Array<T, D>> {
    grid.into_dimensionality::<D>()
        .context("Unexpected grid dimensionality")
}

/// Write a label grid: an image for 2D grids, a slice directory for volumes.
pub fn write_labels(labels: &ArrayD<u32>, path: &Path) -> Result<()> {
    let saved = match labels.ndim() {
        3 => save_volume_labels(&fixed::<_, Ix3>(labels.clone())?, path, "tiff"),
        _ => save_labels(&fixed::<_, Ix2>(labels.clone())?, path),
    };
    saved.with_context(|| format!("Failed to save labels to {}", path.display()))
}

/// Write the color rendering of a label grid, one PNG per plane for volumes.
pub fn write_colors(labels: &ArrayD<u32>, path: &Path) -> Result<()> {
    if labels.ndim() == 2 {
        let image = fixed::<_, Ix2>(labels.clone())?;
        return save_label_colors(&image, path)
            .with_context(|| format!("Failed to save colors to {}", path.display()));
    }
    let volume = fixed::<_, Ix3>(labels.clone())?;
    std::fs::create_dir_all(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    for (index, plane) in volume.axis_iter(Axis(0)).enumerate() {
        let slice = path.join(format!("slice_{index:04}.png"));
        save_label_colors(&plane.to_owned(), &slice)
            .with_context(|| format!("Failed to save colors to {}", slice.display()))?;
    }
    Ok(())
}
