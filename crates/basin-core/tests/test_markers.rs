mod common;

use basin_core::flood::{watershed_2d, WatershedConfig};
use basin_core::markers::{label_components, regional_minima};
use basin_core::topology::Connectivity;
use basin_core::BasinError;
use ndarray::{Array2, Array3};

use common::grid2;

// ---------------------------------------------------------------------------
// label_components
// ---------------------------------------------------------------------------

#[test]
fn test_label_components_empty() {
    let binary = Array2::from_elem((4, 4), false);
    let labels = label_components(binary.view(), Connectivity::Four).unwrap();
    assert!(labels.iter().all(|&l| l == 0));
}

#[test]
fn test_label_components_raster_order() {
    let binary = grid2(5, 5, |r, c| (r == 0 && c == 4) || (r == 4 && c == 0) || (r == 2 && c == 2));
    let labels = label_components(binary.view(), Connectivity::Four).unwrap();
    assert_eq!(labels[[0, 4]], 1);
    assert_eq!(labels[[2, 2]], 2);
    assert_eq!(labels[[4, 0]], 3);
}

#[test]
fn test_label_components_diagonal_depends_on_connectivity() {
    let binary = grid2(4, 4, |r, c| r == c);
    let four = label_components(binary.view(), Connectivity::Four).unwrap();
    assert_eq!(four.iter().copied().max(), Some(4));
    let eight = label_components(binary.view(), Connectivity::Eight).unwrap();
    assert_eq!(eight.iter().copied().max(), Some(1));
}

#[test]
fn test_label_components_u_shape_merges() {
    // Two arms joined only at the bottom row: the first pass sees two
    // provisional labels that must be unified.
    let binary = grid2(4, 5, |r, c| c == 0 || c == 4 || r == 3);
    let labels = label_components(binary.view(), Connectivity::Four).unwrap();
    assert!(binary
        .indexed_iter()
        .all(|((r, c), &b)| !b || labels[[r, c]] == 1));
    assert_eq!(labels[[0, 2]], 0);
}

#[test]
fn test_label_components_volume() {
    let mut binary = Array3::from_elem((3, 3, 3), false);
    binary[[0, 0, 0]] = true;
    binary[[1, 1, 1]] = true;
    binary[[2, 2, 2]] = true;
    let six = label_components(binary.view(), Connectivity::Six).unwrap();
    assert_eq!(six.iter().copied().max(), Some(3));
    let twenty_six = label_components(binary.view(), Connectivity::TwentySix).unwrap();
    assert_eq!(twenty_six.iter().copied().max(), Some(1));
}

#[test]
fn test_label_components_rejects_wrong_connectivity() {
    let binary = Array2::from_elem((3, 3), true);
    let result = label_components(binary.view(), Connectivity::Six);
    assert!(matches!(
        result,
        Err(BasinError::InvalidConnectivity {
            connectivity: 6,
            ndim: 2
        })
    ));
}

// ---------------------------------------------------------------------------
// regional_minima
// ---------------------------------------------------------------------------

#[test]
fn test_regional_minima_two_pits() {
    let intensity = grid2(5, 9, |r, c| {
        let d1 = r.abs_diff(2) + c.abs_diff(1);
        let d2 = r.abs_diff(2) + c.abs_diff(7);
        d1.min(d2) as f32
    });
    let minima = regional_minima(intensity.view(), Connectivity::Four).unwrap();
    assert_eq!(minima[[2, 1]], 1);
    assert_eq!(minima[[2, 7]], 2);
    assert_eq!(minima.iter().filter(|&&l| l != 0).count(), 2);
}

#[test]
fn test_regional_minima_plateau_is_one_marker() {
    let intensity = grid2(5, 5, |r, c| if (1..=3).contains(&r) && c < 2 { 0u8 } else { 5u8 });
    let minima = regional_minima(intensity.view(), Connectivity::Four).unwrap();
    for r in 1..=3 {
        for c in 0..2 {
            assert_eq!(minima[[r, c]], 1);
        }
    }
    assert_eq!(minima.iter().filter(|&&l| l != 0).count(), 6);
}

#[test]
fn test_regional_minima_flat_grid_is_single_minimum() {
    let intensity = Array2::<f32>::from_elem((3, 4), 0.5);
    let minima = regional_minima(intensity.view(), Connectivity::Eight).unwrap();
    assert!(minima.iter().all(|&l| l == 1));
}

#[test]
fn test_regional_minima_shelf_is_not_a_minimum() {
    // A flat shelf at 2.0 that drains into a lower corner.
    let intensity = grid2(3, 3, |r, c| if r == 2 && c == 2 { 0.0f32 } else { 2.0 });
    let minima = regional_minima(intensity.view(), Connectivity::Four).unwrap();
    assert_eq!(minima[[2, 2]], 1);
    assert_eq!(minima.iter().filter(|&&l| l != 0).count(), 1);
}

#[test]
fn test_regional_minima_seed_a_watershed() {
    let intensity = grid2(7, 11, |r, c| {
        let d1 = r.abs_diff(3) + c.abs_diff(2);
        let d2 = r.abs_diff(3) + c.abs_diff(8);
        d1.min(d2) as f32
    });
    let markers = regional_minima(intensity.view(), Connectivity::Four).unwrap();
    let labels = watershed_2d(&intensity, &markers, None, &WatershedConfig::default()).unwrap();
    assert_eq!(labels[[3, 0]], 1);
    assert_eq!(labels[[3, 10]], 2);
    assert_eq!(labels[[3, 5]], 0);
}
