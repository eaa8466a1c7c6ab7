use crate::{
    color::Color,
    constants::EPSILON_COS_THETA,
    geometry::{normal::Normal, point::Point, traits::DotProduct, vector::Vector},
    sampler::{sample_triangle, Sampler},
};

/// The four emitter kinds this crate supports. Only `Area` participates in
/// next-event estimation as the chosen NEE target — a conforming scene
/// never hands a Dirac emitter to `random_emitter` followed by NEE, since a
/// shadow ray can never land on a point with zero measure. The Dirac kinds
/// are implemented for trait-completeness and for the "escape the scene"
/// path (`Environment`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Area,
    Directional,
    Environment,
    Point,
}

/// An emitter bound to the scene by identifier. Every variant implements
/// the same capability set: sample a point, evaluate outgoing radiance,
/// and report a sampling density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Emitter {
    /// One-sided triangle area light. `a`, `b`, `c` are the triangle
    /// vertices; `normal` and `area_pdf` are precomputed from them.
    Triangle {
        a: Point,
        b: Point,
        c: Point,
        normal: Normal,
        area_pdf: f64,
        radiance: Color,
    },
    Point {
        origin: Point,
        intensity: Color,
    },
    Directional {
        direction: Vector,
        radiance: Color,
    },
    Environment {
        radiance: Color,
    },
}

impl Emitter {
    pub fn new_triangle(a: Point, b: Point, c: Point, radiance: Color) -> Emitter {
        let edge1 = b - a;
        let edge2 = c - a;
        let cross = edge1.cross(&edge2);
        let normal: Normal = cross.normalized().into();
        let area_pdf = 1.0 / (0.5 * cross.magnitude());
        Emitter::Triangle {
            a,
            b,
            c,
            normal,
            area_pdf,
            radiance,
        }
    }

    /// Returns a point on the emitter distributed according to its area
    /// measure. Undefined (never called by a conforming integrator) for
    /// Dirac kinds, which have no surface to sample a point on.
    pub fn sample(&self, sampler: &mut Sampler) -> Point {
        match self {
            Emitter::Triangle { a, b, c, .. } => {
                let (u1, u2) = sampler.next2();
                let (u, v) = sample_triangle(u1, u2);
                *a + (*b - *a) * u + (*c - *a) * v
            }
            Emitter::Point { origin, .. } => *origin,
            Emitter::Directional { .. } | Emitter::Environment { .. } => Point::O,
        }
    }

    /// Radiance leaving `point` towards `direction_away`. For a one-sided
    /// area emitter this is `BLACK` unless `direction_away` is on the same
    /// side as the surface normal.
    pub fn radiance(&self, point: Point, direction_away: Vector) -> Color {
        match self {
            Emitter::Triangle {
                normal, radiance, ..
            } => {
                if normal.dot(&direction_away) > 0.0 {
                    *radiance
                } else {
                    Color::BLACK
                }
            }
            Emitter::Point { intensity, .. } => {
                let _ = point;
                *intensity
            }
            Emitter::Directional { radiance, .. } => *radiance,
            Emitter::Environment { radiance } => *radiance,
        }
    }

    /// `(pdf_area, cos_theta)` at `point` for a ray departing towards
    /// `direction_away`. Returns `(0, 0)` when the cosine is at or below
    /// `EPSILON_COS_THETA`, which both prevents a division blow-up in the
    /// NEE area-to-solid-angle conversion and rejects back-face sampling.
    /// `point` is part of the contract so a future emitter kind whose
    /// normal varies across its surface can use it; `Triangle`'s normal is
    /// constant, so it ignores the argument.
    pub fn pdf_le(&self, point: Point, direction_away: Vector) -> (f64, f64) {
        let _ = point;
        match self {
            Emitter::Triangle { normal, area_pdf, .. } => {
                let cos_theta = normal.dot(&direction_away);
                if cos_theta < EPSILON_COS_THETA {
                    (0.0, 0.0)
                } else {
                    (*area_pdf, cos_theta)
                }
            }
            Emitter::Point { .. } | Emitter::Directional { .. } | Emitter::Environment { .. } => {
                (0.0, 0.0)
            }
        }
    }

    pub fn kind(&self) -> Type {
        match self {
            Emitter::Triangle { .. } => Type::Area,
            Emitter::Point { .. } => Type::Point,
            Emitter::Directional { .. } => Type::Directional,
            Emitter::Environment { .. } => Type::Environment,
        }
    }

    pub fn is_dirac(&self) -> bool {
        matches!(self, Emitter::Point { .. } | Emitter::Directional { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn unit_triangle() -> Emitter {
        Emitter::new_triangle(
            Point::O,
            Point::new(1, 0, 0),
            Point::new(0, 1, 0),
            Color::WHITE,
        )
    }

    #[test]
    fn triangle_area_pdf_matches_area() {
        let emitter = unit_triangle();
        // right triangle with legs of length 1 has area 0.5
        if let Emitter::Triangle { area_pdf, .. } = emitter {
            assert_abs_diff_eq!(area_pdf, 2.0, epsilon = 1e-9);
        } else {
            unreachable!();
        }
    }

    #[test]
    fn triangle_sample_lies_in_plane() {
        let emitter = unit_triangle();
        let mut sampler = Sampler::for_pixel(1, 1);
        for _ in 0..16 {
            let p = emitter.sample(&mut sampler);
            assert_abs_diff_eq!(p.z(), 0.0, epsilon = 1e-9);
            assert!(p.x() >= -1e-9 && p.y() >= -1e-9);
        }
    }

    #[test]
    fn back_face_radiance_is_black() {
        let emitter = unit_triangle();
        assert_eq!(emitter.radiance(Point::O, Vector(0.0, 0.0, -1.0)), Color::BLACK);
        assert_eq!(emitter.radiance(Point::O, Vector(0.0, 0.0, 1.0)), Color::WHITE);
    }

    #[test]
    fn pdf_le_rejects_grazing_and_back_directions() {
        let emitter = unit_triangle();
        let (pdf_a, cos_theta) = emitter.pdf_le(Point::O, Vector(0.0, 0.0, 1.0));
        assert!(pdf_a > 0.0);
        assert_abs_diff_eq!(cos_theta, 1.0, epsilon = 1e-9);

        let (pdf_a, cos_theta) = emitter.pdf_le(Point::O, Vector(0.0, 0.0, -1.0));
        assert_eq!(pdf_a, 0.0);
        assert_eq!(cos_theta, 0.0);
    }

    #[test]
    fn dirac_kinds_report_is_dirac() {
        assert!(Emitter::Point {
            origin: Point::O,
            intensity: Color::WHITE
        }
        .is_dirac());
        assert!(!unit_triangle().is_dirac());
    }
}
