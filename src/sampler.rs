use rand::{rngs::SmallRng, Rng, SeedableRng};
use rand_distr::Uniform;

use crate::{
    constants::{SEED_A, SEED_B},
    geometry::{normal::Normal, traits::DotProduct, vector::Vector},
};

/// A deterministic per-pixel pseudo-random source. No explicit stream API
/// beyond "next uniform real" — callers that need correlated pairs (e.g. a
/// hemisphere sample) draw two reals and combine them themselves via the
/// free functions below.
///
/// Reproducibility: `Sampler::for_pixel(x, y)` followed by the same sequence
/// of `next()` calls always produces the same reals, independent of thread
/// scheduling, because the seed is a pure function of `(x, y)`.
pub struct Sampler {
    rng: SmallRng,
    dist: Uniform<f64>,
}

impl Sampler {
    /// Seeds as `(x + 1) * A XOR (y + 1) * B` so adjacent pixels decorrelate.
    pub fn for_pixel(x: u32, y: u32) -> Sampler {
        let seed = (x as u64 + 1).wrapping_mul(SEED_A) ^ (y as u64 + 1).wrapping_mul(SEED_B);
        Sampler {
            rng: SmallRng::seed_from_u64(seed),
            dist: Uniform::new(0.0, 1.0),
        }
    }

    /// Returns a value in `[0, 1)`.
    pub fn next(&mut self) -> f64 {
        self.rng.sample(self.dist)
    }

    /// Returns a value in `[0, 1)^2`.
    pub fn next2(&mut self) -> (f64, f64) {
        (self.next(), self.next())
    }
}

/// Returns the barycentric co-ordinates `(u, v)` of a uniform sample on a
/// triangle, via the standard two-uniform warp `(1 - sqrt(u1), u2 * sqrt(u1))`.
pub fn sample_triangle(u1: f64, u2: f64) -> (f64, f64) {
    let su1 = u1.sqrt();
    (1.0 - su1, u2 * su1)
}

/// Uniform sample on the unit disk, via the Shirley-Chiu concentric mapping.
pub fn sample_disk(u1: f64, u2: f64) -> (f64, f64) {
    let (u, v) = (2.0 * u1 - 1.0, 2.0 * u2 - 1.0);
    if u == 0.0 && v == 0.0 {
        return (0.0, 0.0);
    }
    let (r, theta) = if u.abs() > v.abs() {
        (u, std::f64::consts::FRAC_PI_4 * (v / u))
    } else {
        (v, std::f64::consts::FRAC_PI_2 - std::f64::consts::FRAC_PI_4 * (u / v))
    };
    (r * theta.cos(), r * theta.sin())
}

/// Cosine-weighted hemisphere sample around `normal`, used by `Lambertian`
/// for its `Diffuse` event.
pub fn cosine_sample_hemisphere(u1: f64, u2: f64, normal: &Normal) -> Vector {
    let normal_v: Vector = normal.into();
    let (tangent, bitangent) = normal_v.generate_tangents();
    let (x, y) = sample_disk(u1, u2);
    let z = (1.0 - x * x - y * y).max(0.0).sqrt();
    let v = tangent * x + bitangent * y + normal_v * z;
    debug_assert!(v.dot(&normal_v) >= 0.0);
    v
}
