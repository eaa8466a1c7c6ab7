use crate::{
    bounds::Bounds,
    constants::EPSILON_RAY,
    geometry::{normal::Normal, point::Point, traits::DotProduct, vector::Vector},
    ray::Ray,
};

/// A shape's raw intersection result: the hit distance and the geometric
/// normal at that point. Shading normals (interpolated per-vertex normals,
/// bump mapping) are out of scope collaborator work.
#[derive(Debug, Clone, Copy)]
pub struct ShapeHit {
    pub distance: f64,
    pub normal: Normal,
}

/// The handful of primitive shapes the scene collaborator needs to back a
/// `Triangle` emitter and to give the integrator something to intersect.
/// A general mesh/instancing system is out of scope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Triangle { a: Point, b: Point, c: Point },
    Sphere { center: Point, radius: f64 },
}

impl Shape {
    pub fn bounds(&self) -> Bounds {
        match self {
            Shape::Triangle { a, b, c } => Bounds::new(*a, *b) + Bounds::new(*c, *c),
            Shape::Sphere { center, radius } => Bounds::new(
                *center - Vector(*radius, *radius, *radius),
                *center + Vector(*radius, *radius, *radius),
            ),
        }
    }

    pub fn intersect(&self, ray: &Ray) -> Option<ShapeHit> {
        match self {
            Shape::Triangle { a, b, c } => intersect_triangle(ray, *a, *b, *c),
            Shape::Sphere { center, radius } => intersect_sphere(ray, *center, *radius),
        }
    }
}

/// Möller–Trumbore ray/triangle intersection.
fn intersect_triangle(ray: &Ray, a: Point, b: Point, c: Point) -> Option<ShapeHit> {
    let edge1 = b - a;
    let edge2 = c - a;
    let p = ray.direction.cross(&edge2);
    let det = edge1.dot(&p);
    if det.abs() < EPSILON_RAY {
        return None;
    }
    let inv_det = 1.0 / det;
    let t_vec = ray.origin - a;
    let u = t_vec.dot(&p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = t_vec.cross(&edge1);
    let v = ray.direction.dot(&q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let distance = edge2.dot(&q) * inv_det;
    if distance < ray.epsilon {
        return None;
    }
    let normal: Normal = edge1.cross(&edge2).normalized().into();
    Some(ShapeHit { distance, normal })
}

fn intersect_sphere(ray: &Ray, center: Point, radius: f64) -> Option<ShapeHit> {
    let oc = ray.origin - center;
    let b = oc.dot(&ray.direction);
    let c = oc.dot(&oc) - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_d = discriminant.sqrt();
    let t_near = -b - sqrt_d;
    let t_far = -b + sqrt_d;
    let distance = if t_near >= ray.epsilon {
        t_near
    } else if t_far >= ray.epsilon {
        t_far
    } else {
        return None;
    };
    let point = ray.at(distance);
    let normal: Normal = ((point - center) / radius).into();
    Some(ShapeHit { distance, normal })
}
