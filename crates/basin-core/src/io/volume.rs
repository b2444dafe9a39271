//! 3D volumes stored as directories of 2D slice images.

use std::path::{Path, PathBuf};

use ndarray::{Array2, Array3, Axis};
use tracing::debug;

use crate::error::{BasinError, Result};

use super::image_io::save_labels;

const SLICE_EXTENSIONS: [&str; 3] = ["png", "tif", "tiff"];

/// Slice images in `dir`, sorted by file name.
pub fn list_slices(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut slices: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(|e| SLICE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
                    .unwrap_or(false)
        })
        .collect();
    slices.sort();
    Ok(slices)
}

/// Stack the slices of `dir` into a `[plane, row, col]` volume using `load`
/// for each slice. All slices must share one size.
pub fn load_volume<T, F>(dir: &Path, load: F) -> Result<Array3<T>>
where
    T: Clone,
    F: Fn(&Path) -> Result<Array2<T>>,
{
    let slices = list_slices(dir)?;
    if slices.is_empty() {
        return Err(BasinError::EmptyVolume(dir.display().to_string()));
    }
    let planes = slices
        .iter()
        .map(|path| load(path))
        .collect::<Result<Vec<_>>>()?;

    let expected = planes[0].dim();
    for plane in &planes {
        if plane.dim() != expected {
            return Err(BasinError::DimensionMismatch {
                what: "volume slice",
                expected: vec![expected.0, expected.1],
                actual: vec![plane.nrows(), plane.ncols()],
            });
        }
    }

    let views: Vec<_> = planes.iter().map(|p| p.view()).collect();
    let volume = ndarray::stack(Axis(0), &views)?;
    debug!(dir = %dir.display(), planes = volume.len_of(Axis(0)), "Loaded volume");
    Ok(volume)
}

/// Write each plane of a label volume to `dir` as `slice_NNNN.<extension>`.
pub fn save_volume_labels(labels: &Array3<u32>, dir: &Path, extension: &str) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    for (index, plane) in labels.axis_iter(Axis(0)).enumerate() {
        let path = dir.join(format!("slice_{index:04}.{extension}"));
        save_labels(&plane.to_owned(), &path)?;
    }
    Ok(())
}
