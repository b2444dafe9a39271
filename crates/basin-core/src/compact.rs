//! Compact watershed priority: raw value plus a distance-to-seed penalty
//! accumulated along the flood path.

use crate::error::{BasinError, Result};
use crate::topology::Coord;

/// Compactness weight `c`. Zero gives the plain intensity-ordered watershed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Compactness(f64);

impl Compactness {
    pub fn new(weight: f64) -> Result<Self> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(BasinError::InvalidParameter(format!(
                "compactness must be finite and non-negative, got {weight}"
            )));
        }
        Ok(Self(weight))
    }

    pub fn weight(self) -> f64 {
        self.0
    }

    pub fn is_enabled(self) -> bool {
        self.0 > 0.0
    }

    /// `c * |origin - coord|` in grid units.
    pub fn penalty(self, origin: Coord, coord: Coord) -> f64 {
        if !self.is_enabled() {
            return 0.0;
        }
        self.0 * euclidean_distance(origin, coord)
    }

    /// Path increment of a cell grown from `origin` through a parent whose
    /// own increment (priority minus raw value) is `parent_increment`.
    ///
    /// The cell's priority is its raw value plus this increment. Marker cells
    /// have an increment of 0, and with a zero weight every increment stays 0.
    pub fn increment(self, parent_increment: f64, origin: Coord, coord: Coord) -> f64 {
        parent_increment + self.penalty(origin, coord)
    }
}

pub fn euclidean_distance(a: Coord, b: Coord) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = x as f64 - y as f64;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_weight_adds_nothing() {
        let c = Compactness::new(0.0).unwrap();
        assert_eq!(c.increment(0.0, [0, 0, 0], [0, 30, 40]), 0.0);
    }

    #[test]
    fn penalty_scales_with_distance() {
        let c = Compactness::new(0.5).unwrap();
        assert!((c.penalty([0, 0, 0], [0, 3, 4]) - 2.5).abs() < 1e-12);
        assert!((c.increment(1.5, [1, 0, 0], [1, 0, 2]) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn rejects_negative_and_nan() {
        assert!(Compactness::new(-0.1).is_err());
        assert!(Compactness::new(f64::NAN).is_err());
    }
}
