use std::{iter::Sum, ops::Add};

use crate::{
    geometry::{point::Point, Axis, AXES},
    ray::Ray,
};

/// An axis-aligned bounding box, used only by the BVH. Acceleration
/// structure sophistication is deliberately minimal here; this is the
/// minimum needed to keep `Scene::intersect` sub-linear for anything larger
/// than a handful of primitives.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub fn new(a: Point, b: Point) -> Bounds {
        Bounds {
            min: Point(a.x().min(b.x()), a.y().min(b.y()), a.z().min(b.z())),
            max: Point(a.x().max(b.x()), a.y().max(b.y()), a.z().max(b.z())),
        }
    }

    pub fn centroid(&self) -> Point {
        Point(
            (self.min.x() + self.max.x()) * 0.5,
            (self.min.y() + self.max.y()) * 0.5,
            (self.min.z() + self.max.z()) * 0.5,
        )
    }

    pub fn contains(&self, p: &Point) -> bool {
        p.x() >= self.min.x()
            && p.x() <= self.max.x()
            && p.y() >= self.min.y()
            && p.y() <= self.max.y()
            && p.z() >= self.min.z()
            && p.z() <= self.max.z()
    }

    pub fn maximum_extent(&self) -> Axis {
        let d = self.max - self.min;
        AXES.into_iter()
            .max_by(|a, b| d[*a].total_cmp(&d[*b]))
            .unwrap()
    }

    pub fn surface_area(&self) -> f64 {
        let d = self.max - self.min;
        2.0 * (d.x() * d.y() + d.y() * d.z() + d.z() * d.x())
    }

    /// Fractional position of `p` within the bounds on each axis, in `[0, 1]`
    /// for `p` inside the box.
    pub fn offset(&self, p: &Point) -> [f64; 3] {
        let d = self.max - self.min;
        let o = *p - self.min;
        AXES.map(|axis| if d[axis] > 0.0 { o[axis] / d[axis] } else { 0.0 })
    }

    /// Slab test. Returns the nearest hit distance that is still ahead of
    /// `ray.epsilon`, preferring the near face and falling back to the far
    /// face when the ray origin is already inside the box.
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        let mut t_near = f64::NEG_INFINITY;
        let mut t_far = f64::INFINITY;

        for axis in AXES {
            let d = ray.direction[axis];
            if d.abs() < f64::EPSILON {
                if ray.origin[axis] < self.min[axis] || ray.origin[axis] > self.max[axis] {
                    return None;
                }
                continue;
            }
            let inv_d = 1.0 / d;
            let mut t0 = (self.min[axis] - ray.origin[axis]) * inv_d;
            let mut t1 = (self.max[axis] - ray.origin[axis]) * inv_d;
            if inv_d < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_near = t_near.max(t0);
            t_far = t_far.min(t1);
            if t_near > t_far {
                return None;
            }
        }

        if t_near >= ray.epsilon {
            Some(t_near)
        } else if t_far >= ray.epsilon {
            Some(t_far)
        } else {
            None
        }
    }
}

impl Add for Bounds {
    type Output = Bounds;
    fn add(self, rhs: Bounds) -> Bounds {
        Bounds::new(
            Point(
                self.min.x().min(rhs.min.x()),
                self.min.y().min(rhs.min.y()),
                self.min.z().min(rhs.min.z()),
            ),
            Point(
                self.max.x().max(rhs.max.x()),
                self.max.y().max(rhs.max.y()),
                self.max.z().max(rhs.max.z()),
            ),
        )
    }
}

impl Sum for Bounds {
    fn sum<I: Iterator<Item = Bounds>>(mut iter: I) -> Bounds {
        let first = iter
            .next()
            .unwrap_or(Bounds::new(Point::O, Point::O));
        iter.fold(first, Add::add)
    }
}
