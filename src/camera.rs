use crate::{constants::EPSILON_RAY, geometry::point::Point, ray::Ray, sampler::Sampler};

/// Generates a primary ray for a pixel. Only a pinhole projection is
/// implemented; depth of field, motion blur, and other camera models are
/// a collaborator's concern, not the integrator's — this exists so the
/// integrator tests and demo binary have something concrete to drive
/// `estimate` with.
#[derive(Debug, Clone, Copy)]
pub struct PinholeCamera {
    origin: Point,
    /// Unit vectors spanning the image plane and the view direction.
    right: crate::geometry::vector::Vector,
    up: crate::geometry::vector::Vector,
    forward: crate::geometry::vector::Vector,
    image_width: u32,
    image_height: u32,
    /// Half the image plane's height at unit distance; derived from the
    /// vertical field of view.
    half_height: f64,
}

impl PinholeCamera {
    pub fn new(
        origin: Point,
        look_at: Point,
        up_hint: crate::geometry::vector::Vector,
        vertical_fov_degrees: f64,
        image_width: u32,
        image_height: u32,
    ) -> PinholeCamera {
        let forward = (look_at - origin).normalized();
        let right = forward.cross(&up_hint).normalized();
        let up = right.cross(&forward);
        let half_height = (vertical_fov_degrees.to_radians() * 0.5).tan();
        PinholeCamera {
            origin,
            right,
            up,
            forward,
            image_width,
            image_height,
            half_height,
        }
    }

    /// Generates a ray through pixel `(x, y)`, jittered within the pixel
    /// footprint by `sampler` for anti-aliasing.
    pub fn generate_ray(&self, x: u32, y: u32, sampler: &mut Sampler) -> Ray {
        let (jx, jy) = sampler.next2();
        let aspect = self.image_width as f64 / self.image_height as f64;
        let half_width = self.half_height * aspect;

        let u = ((x as f64 + jx) / self.image_width as f64) * 2.0 - 1.0;
        let v = 1.0 - ((y as f64 + jy) / self.image_height as f64) * 2.0;

        let direction =
            (self.forward + self.right * (u * half_width) + self.up * (v * self.half_height))
                .normalized();
        Ray::new(self.origin, direction, EPSILON_RAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{traits::DotProduct, vector::Vector};
    use approx::assert_abs_diff_eq;

    #[test]
    fn center_pixel_points_roughly_forward() {
        let camera = PinholeCamera::new(Point::O, Point::new(0, 0, -1), Vector::Y, 60.0, 100, 100);
        let mut sampler = Sampler::for_pixel(0, 0);
        let ray = camera.generate_ray(50, 50, &mut sampler);
        assert_abs_diff_eq!(ray.direction.dot(&Vector(0.0, 0.0, -1.0)), 1.0, epsilon = 0.05);
    }
}
