use approx::assert_abs_diff_eq;

use crate::{
    constants::EPSILON,
    geometry::{point::Point, vector::Vector},
};

/// A ray segment: an origin, a unit direction, and the minimum parameter at
/// which a hit is considered valid. `epsilon` replaces the usual "t_min"
/// constant with a per-ray value so shadow rays can use a distance-scaled
/// floor if a future collaborator wants one; the integrator always passes
/// `EPSILON_RAY`.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Point,
    pub direction: Vector,
    pub epsilon: f64,
}

impl Ray {
    pub fn new(origin: Point, direction: Vector, epsilon: f64) -> Ray {
        assert_abs_diff_eq!(direction.magnitude(), 1.0, epsilon = EPSILON);
        assert!(epsilon >= 0.0);
        Ray {
            origin,
            direction,
            epsilon,
        }
    }

    pub fn at(&self, distance: f64) -> Point {
        self.origin + self.direction * distance
    }
}
