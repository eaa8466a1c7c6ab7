use std::f64::consts::FRAC_1_PI;

use crate::{
    color::Color,
    geometry::{
        normal::{Normal, SameHemisphere},
        traits::DotProduct,
        vector::Vector,
    },
    intersection::Intersection,
    sampler::{cosine_sample_hemisphere, Sampler},
};

/// Tags the kind of scattering event a `Material::sample` call produced.
/// Kept as an explicit sum type (rather than an out-parameter or a second
/// "is this emissive" query) so the integrator's bounce loop reads as a
/// single `match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Absorption, or a degenerate sampling configuration. Terminal.
    None,
    /// The material is emissive; the integrator consults the bound emitter
    /// for radiance rather than continuing the path.
    Emission,
    /// Lambertian-like: `direction` was drawn from a cosine-weighted
    /// hemisphere, `pdf_w` is a finite solid-angle density.
    Diffuse,
    /// Perfectly specular reflection or transmission. `colour` is already
    /// pre-weighted by the Dirac sampling probability, so the integrator
    /// must not divide by `pdf_w` for this event.
    Reflect,
}

#[derive(Debug, Clone, Copy)]
pub struct MaterialSample {
    pub colour: Color,
    pub direction: Vector,
    pub event: Event,
    pub pdf_w: f64,
    pub cos_theta: f64,
}

fn reflect(w_o: &Vector, normal: &Normal) -> Vector {
    let n: Vector = normal.into();
    n * (n.dot(w_o) * 2.0) - *w_o
}

/// Returns `None` under total internal reflection.
fn refract(w_o: &Vector, normal: &Normal, eta_i: f64, eta_t: f64) -> Option<Vector> {
    let n: Vector = normal.into();
    let cos_theta_i = n.dot(w_o);
    let (n, eta_relative, cos_theta) = if cos_theta_i.is_sign_negative() {
        (-n, eta_i / eta_t, -cos_theta_i)
    } else {
        (n, eta_t / eta_i, cos_theta_i)
    };
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    if sin_theta > eta_relative {
        return None;
    }
    let r_perpendicular = (n * cos_theta - *w_o) / eta_relative;
    let r_parallel = n * -(1.0 - r_perpendicular.dot(&r_perpendicular)).max(0.0).sqrt();
    Some(r_perpendicular + r_parallel)
}

fn fresnel_dielectric(cos_theta_i: f64, eta_i: f64, eta_t: f64) -> f64 {
    let (cos_theta_i, eta_i, eta_t) = if cos_theta_i < 0.0 {
        (-cos_theta_i, eta_t, eta_i)
    } else {
        (cos_theta_i, eta_i, eta_t)
    };
    let sin_theta_i = (1.0 - cos_theta_i * cos_theta_i).max(0.0).sqrt();
    let sin_theta_t = eta_i / eta_t * sin_theta_i;
    if sin_theta_t >= 1.0 {
        return 1.0;
    }
    let cos_theta_t = (1.0 - sin_theta_t * sin_theta_t).max(0.0).sqrt();
    let r_parallel =
        (eta_t * cos_theta_i - eta_i * cos_theta_t) / (eta_t * cos_theta_i + eta_i * cos_theta_t);
    let r_perp =
        (eta_i * cos_theta_i - eta_t * cos_theta_t) / (eta_i * cos_theta_i + eta_t * cos_theta_t);
    (r_parallel * r_parallel + r_perp * r_perp) * 0.5
}

/// A material bound to a primitive by `material_id`. Variants cover the
/// handful of BxDF kinds the expanded spec needs; a full material library
/// (microfacet conductors, layered substrates, textures) is explicitly out
/// of scope collaborator work.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    Lambertian {
        reflectance: Color,
    },
    Mirror {
        reflectance: Color,
    },
    Glass {
        transmittance: Color,
        eta: f64,
    },
    Emissive {
        emitter_id: u32,
    },
}

impl Material {
    /// Samples an outgoing direction given the incoming direction recorded
    /// on `intersection`. The returned event tells the caller how to fold
    /// the sample into path throughput: `Reflect` is pre-weighted and never
    /// divided by its pdf, `Diffuse` carries a separate `cos_theta`/`pdf_w`
    /// for the caller to divide by, and `Emission`/`None` carry neither.
    pub fn sample(&self, intersection: &Intersection, sampler: &mut Sampler) -> MaterialSample {
        let w_o = -intersection.direction_in;
        match self {
            Material::Lambertian { reflectance } => {
                let (u1, u2) = sampler.next2();
                let mut direction = cosine_sample_hemisphere(u1, u2, &intersection.normal);
                if intersection.normal.dot(&w_o) < 0.0 {
                    direction = -direction;
                }
                let cos_theta = intersection.normal.dot(&direction);
                MaterialSample {
                    colour: *reflectance * FRAC_1_PI,
                    direction,
                    event: Event::Diffuse,
                    pdf_w: FRAC_1_PI * cos_theta,
                    cos_theta,
                }
            }
            Material::Mirror { reflectance } => {
                let direction = reflect(&w_o, &intersection.normal);
                let cos_theta = intersection.normal.dot(&direction).abs();
                MaterialSample {
                    colour: *reflectance,
                    direction,
                    event: Event::Reflect,
                    pdf_w: f64::INFINITY,
                    cos_theta,
                }
            }
            Material::Glass { transmittance, eta } => {
                let cos_theta_i = intersection.normal.dot(&w_o);
                let (eta_i, eta_t) = (1.0, *eta);
                let reflectance = fresnel_dielectric(cos_theta_i, eta_i, eta_t);

                if sampler.next() < reflectance {
                    let direction = reflect(&w_o, &intersection.normal);
                    MaterialSample {
                        colour: Color::WHITE,
                        direction,
                        event: Event::Reflect,
                        pdf_w: f64::INFINITY,
                        cos_theta: 1.0,
                    }
                } else {
                    match refract(&w_o, &intersection.normal, eta_i, eta_t) {
                        Some(direction) => MaterialSample {
                            colour: *transmittance,
                            direction,
                            event: Event::Reflect,
                            pdf_w: f64::INFINITY,
                            cos_theta: 1.0,
                        },
                        None => MaterialSample {
                            colour: Color::BLACK,
                            direction: w_o,
                            event: Event::None,
                            pdf_w: 0.0,
                            cos_theta: 0.0,
                        },
                    }
                }
            }
            Material::Emissive { .. } => MaterialSample {
                colour: Color::BLACK,
                direction: Vector::Z,
                event: Event::Emission,
                pdf_w: 0.0,
                cos_theta: 0.0,
            },
        }
    }

    /// Evaluates the BSDF for a given pair of directions. Only meaningful —
    /// and only called by the integrator — for non-Dirac (`Diffuse`)
    /// materials during NEE; Dirac materials return a zero contribution
    /// since a shadow ray can never land exactly on a delta direction.
    pub fn evaluate(
        &self,
        w_i: &Vector,
        w_o: &Vector,
        intersection: &Intersection,
    ) -> (Color, f64, f64) {
        match self {
            Material::Lambertian { reflectance } => {
                if intersection.normal.same_hemisphere(w_o, w_i) {
                    let cos_theta = intersection.normal.dot(w_i);
                    (*reflectance * FRAC_1_PI, FRAC_1_PI * cos_theta.abs(), cos_theta)
                } else {
                    (Color::BLACK, 0.0, -1.0)
                }
            }
            Material::Mirror { .. } | Material::Glass { .. } | Material::Emissive { .. } => {
                (Color::BLACK, 0.0, -1.0)
            }
        }
    }

    /// The emitter bound to this material, for `Emissive` materials.
    pub fn emitter_id(&self) -> Option<u32> {
        match self {
            Material::Emissive { emitter_id } => Some(*emitter_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn reflect_about_normal() {
        let w_o = Vector(0.0, 1.0, 0.0);
        let n = Normal(0.0, 1.0, 0.0);
        assert_abs_diff_eq!(reflect(&w_o, &n), Vector(0.0, 1.0, 0.0));

        let w_o = Vector(1.0, 1.0, 0.0).normalized();
        assert_abs_diff_eq!(reflect(&w_o, &n), Vector(1.0, 1.0, 0.0).normalized());
    }

    #[test]
    fn refract_straight_through_matched_ior() {
        let w_o = Vector(0.0, 1.0, 0.0);
        let n = Normal(0.0, 1.0, 0.0);
        let w_i = refract(&w_o, &n, 1.0, 1.0).unwrap();
        assert_abs_diff_eq!(w_i, Vector(0.0, -1.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn lambertian_sample_is_in_upper_hemisphere() {
        let reflectance = Color::from_rgb(200, 200, 200);
        let material = Material::Lambertian { reflectance };
        let intersection = Intersection {
            point: crate::geometry::point::Point::O,
            normal: Normal(0.0, 1.0, 0.0),
            direction_in: Vector(0.0, -1.0, 0.0),
            material_id: 0,
            distance: 1.0,
        };
        let mut sampler = Sampler::for_pixel(3, 4);
        for _ in 0..32 {
            let sample = material.sample(&intersection, &mut sampler);
            assert_eq!(sample.event, Event::Diffuse);
            assert!(sample.cos_theta > 0.0);
            assert!(sample.pdf_w > 0.0);
        }
    }

    #[test]
    fn emissive_emitter_id_roundtrip() {
        let material = Material::Emissive { emitter_id: 7 };
        assert_eq!(material.emitter_id(), Some(7));
        assert_eq!(Material::Mirror { reflectance: Color::WHITE }.emitter_id(), None);
    }
}
