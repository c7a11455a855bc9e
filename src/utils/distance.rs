// Orientation utilities for the angular sweep

use crate::models::Location;
use geo::kernels::{Kernel, Orientation, RobustKernel};
use geo::Coord;
use std::cmp::Ordering;

/// Orientation of `b` relative to `a` as seen from `pivot`, evaluated exactly.
///
/// `Greater` when `b` lies counter-clockwise of `a`, `Less` when clockwise and
/// `Equal` when the three points are collinear.
pub fn orientation(pivot: &Location, a: &Location, b: &Location) -> Ordering {
    match RobustKernel::orient2d(Coord::from(*pivot), Coord::from(*a), Coord::from(*b)) {
        Orientation::CounterClockwise => Ordering::Greater,
        Orientation::Clockwise => Ordering::Less,
        Orientation::Collinear => Ordering::Equal,
    }
}

/// Polar angle of `p` around `pivot` in (-pi, pi]; 0 for coincident points
pub fn polar_angle(pivot: &Location, p: &Location) -> f64 {
    let (dx, dy) = p.relative_to(pivot);
    dy.atan2(dx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation() {
        let origin = Location::new(0.0, 0.0);
        let east = Location::new(1.0, 0.0);
        let north = Location::new(0.0, 1.0);
        let far_east = Location::new(5.0, 0.0);

        assert_eq!(orientation(&origin, &east, &north), Ordering::Greater);
        assert_eq!(orientation(&origin, &north, &east), Ordering::Less);
        assert_eq!(orientation(&origin, &east, &far_east), Ordering::Equal);
    }

    #[test]
    fn test_orientation_with_shifted_pivot() {
        let pivot = Location::new(2.0, 3.0);
        let a = Location::new(3.0, 3.0);
        let b = Location::new(2.0, 5.0);

        assert_eq!(orientation(&pivot, &a, &b), Ordering::Greater);
        assert_eq!(orientation(&pivot, &b, &a), Ordering::Less);
    }

    #[test]
    fn test_orientation_is_antisymmetric_near_collinear() {
        let pivot = Location::new(10.0, 10.0);
        let points: Vec<Location> = (1..60)
            .map(|t| Location::new(10.0 + 0.1 * t as f64, 10.0 + 0.7 * t as f64))
            .collect();

        for a in &points {
            for b in &points {
                assert_eq!(orientation(&pivot, a, b), orientation(&pivot, b, a).reverse());
            }
        }
    }

    #[test]
    fn test_polar_angle() {
        let origin = Location::new(0.0, 0.0);
        assert_eq!(polar_angle(&origin, &Location::new(-1.0, 0.0)), std::f64::consts::PI);
        assert_eq!(polar_angle(&origin, &origin), 0.0);
    }
}
