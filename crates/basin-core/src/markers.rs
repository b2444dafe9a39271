//! Marker generation: turning binary seed images or intensity minima into
//! labeled marker grids for the watershed.

use ndarray::{Array, Array3, ArrayView, Dimension};
use num_traits::AsPrimitive;

use crate::error::Result;
use crate::flood::as_volume;
use crate::topology::{Connectivity, Coord, Neighborhood};

/// Label the connected `true` components of a binary grid as 1..=n.
///
/// Labels are assigned in raster order of each component's first cell.
pub fn label_components<D: Dimension>(
    binary: ArrayView<'_, bool, D>,
    connectivity: Connectivity,
) -> Result<Array<u32, D>> {
    connectivity.validate(binary.ndim())?;
    let out_dim = binary.raw_dim();
    let volume = as_volume(binary)?;
    let (p, r, c) = volume.dim();

    let labels = two_pass_label(
        Neighborhood::new([p, r, c], connectivity),
        |coord| volume[coord],
        |_, _| true,
    );
    Ok(labels.into_shape_with_order(out_dim)?)
}

/// Label every regional minimum of `intensity` as 1..=n.
///
/// A regional minimum is a connected plateau of equal values with no
/// strictly lower neighbor. All other cells are 0.
pub fn regional_minima<T, D>(
    intensity: ArrayView<'_, T, D>,
    connectivity: Connectivity,
) -> Result<Array<u32, D>>
where
    T: AsPrimitive<f64>,
    D: Dimension,
{
    connectivity.validate(intensity.ndim())?;
    let out_dim = intensity.raw_dim();
    let volume = as_volume(intensity)?;
    let (p, r, c) = volume.dim();
    let neighborhood = Neighborhood::new([p, r, c], connectivity);
    let value = |coord: Coord| -> f64 { volume[coord].as_() };

    let plateaus = two_pass_label(neighborhood, |_| true, |a, b| value(a) == value(b));
    let count = plateaus.iter().copied().max().unwrap_or(0) as usize;

    let mut is_minimum = vec![true; count + 1];
    is_minimum[0] = false;
    for ((p, r, c), &label) in plateaus.indexed_iter() {
        let coord = [p, r, c];
        let here = value(coord);
        if neighborhood.neighbors(coord).any(|n| value(n) < here) {
            is_minimum[label as usize] = false;
        }
    }

    let mut remap = vec![0u32; count + 1];
    let mut next = 0u32;
    for &label in plateaus.iter() {
        let label = label as usize;
        if is_minimum[label] && remap[label] == 0 {
            next += 1;
            remap[label] = next;
        }
    }
    let minima = plateaus.mapv(|label| remap[label as usize]);
    Ok(minima.into_shape_with_order(out_dim)?)
}

/// Two-pass union-find labeling.
///
/// Cells for which `include` holds are joined with each included backward
/// neighbor for which `joins` holds. Returns consecutive labels in raster
/// order of first appearance; excluded cells are 0.
fn two_pass_label(
    neighborhood: Neighborhood,
    include: impl Fn(Coord) -> bool,
    joins: impl Fn(Coord, Coord) -> bool,
) -> Array3<u32> {
    let [planes, rows, cols] = neighborhood.shape();
    let mut labels = Array3::<u32>::zeros((planes, rows, cols));
    // Union-find parent array. Index 0 unused; labels start at 1.
    let mut parent: Vec<u32> = vec![0];

    // Pass 1: assign provisional labels.
    for plane in 0..planes {
        for row in 0..rows {
            for col in 0..cols {
                let coord = [plane, row, col];
                if !include(coord) {
                    continue;
                }
                let mut assigned = 0u32;
                for n in neighborhood.backward_neighbors(coord) {
                    let other = labels[n];
                    if other == 0 || !joins(coord, n) {
                        continue;
                    }
                    if assigned == 0 {
                        assigned = other;
                    } else if other != assigned {
                        union(&mut parent, assigned, other);
                    }
                }
                if assigned == 0 {
                    assigned = parent.len() as u32;
                    parent.push(assigned);
                }
                labels[coord] = assigned;
            }
        }
    }

    // Pass 2: resolve roots to consecutive labels.
    let mut remap = vec![0u32; parent.len()];
    let mut next = 0u32;
    for label in labels.iter_mut() {
        if *label == 0 {
            continue;
        }
        let root = find(&parent, *label) as usize;
        if remap[root] == 0 {
            next += 1;
            remap[root] = next;
        }
        *label = remap[root];
    }
    labels
}

fn find(parent: &[u32], mut x: u32) -> u32 {
    while parent[x as usize] != x {
        x = parent[x as usize];
    }
    x
}

fn union(parent: &mut [u32], a: u32, b: u32) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra != rb {
        // Merge larger root into smaller root to keep labels consistent.
        let (small, big) = if ra < rb { (ra, rb) } else { (rb, ra) };
        parent[big as usize] = small;
    }
}
