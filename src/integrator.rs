use crate::{
    camera::PinholeCamera,
    color::Color,
    config::RenderConfig,
    constants::EPSILON_RAY,
    geometry::{point::Point, traits::DotProduct},
    material::Event,
    ray::Ray,
    sampler::Sampler,
    scene::Scene,
    sensor::Sensor,
};
use std::sync::Mutex;

/// Estimates per-pixel radiance via unidirectional Monte Carlo path
/// tracing, optionally combined with next-event estimation (NEE). This is
/// the one piece of this crate that is not a collaborator: camera ray
/// generation and scene intersection are handed in; this module's only job
/// is the recursive estimator itself and writing its result to the sensor.
///
/// With NEE disabled, a path's only source of radiance is hitting an
/// emissive surface by chance (`basic` mode). With NEE enabled, every
/// non-specular bounce additionally samples a point on a light directly
/// and asks whether it's visible, which is why NEE dramatically reduces
/// variance for small, hard-to-hit lights — at the cost of emission hits
/// needing to discard paths that NEE has already accounted for, to avoid
/// double-counting direct light.
///
/// The sensor is behind a `Mutex` rather than a bare `&mut Sensor`: a
/// `PathIntegrator` is shared (not cloned) across the renderer's scanline
/// threads, and each `estimate` call locks only for the single write at the
/// end of its sample loop.
pub struct PathIntegrator<'a> {
    camera: &'a PinholeCamera,
    scene: &'a Scene,
    sensor: &'a Mutex<Sensor>,
    config: RenderConfig,
}

impl<'a> PathIntegrator<'a> {
    pub fn new(
        camera: &'a PinholeCamera,
        scene: &'a Scene,
        sensor: &'a Mutex<Sensor>,
        config: RenderConfig,
    ) -> PathIntegrator<'a> {
        PathIntegrator {
            camera,
            scene,
            sensor,
            config,
        }
    }

    /// Draws `config.max_samples` paths through pixel `(x, y)`, sums their
    /// contributions, and writes the total to the sensor once. The pixel's
    /// `Sampler` is seeded once here, not once per sample, so every sample
    /// drawn for a pixel shares one reproducible random stream.
    pub fn estimate(&self, x: u32, y: u32) {
        let mut sampler = Sampler::for_pixel(x, y);
        let mut accumulated = Color::BLACK;
        for _ in 0..self.config.max_samples {
            accumulated += self.sample(x, y, &mut sampler);
        }
        self.sensor.lock().unwrap().write(x, y, accumulated);
    }

    /// Traces a single sample through pixel `(x, y)` and returns its
    /// estimate of the radiance arriving at the sensor.
    fn sample(&self, x: u32, y: u32, sampler: &mut Sampler) -> Color {
        let ray = self.camera.generate_ray(x, y, sampler);

        // One emitter, and one point on it, is chosen per path rather than
        // per bounce: reusing the same light sample for every NEE shadow
        // ray along a path is a deliberate variance-reduction trade (fewer
        // distinct light samples probed per pixel, but each one probed
        // more thoroughly across the path's bounces). Re-sampling the point
        // at each diffuse bounce would be a different, higher-variance
        // estimator.
        let reused_emitter = if self.config.enable_nee && self.scene.emitter_count() > 0 {
            let (emitter_id, select_pdf) = self.scene.random_emitter(sampler);
            let point = self.scene.emitter(emitter_id).sample(sampler);
            Some((emitter_id, select_pdf, point))
        } else {
            None
        };

        let radiance = self.trace(ray, sampler, reused_emitter);
        debug_assert!(radiance.is_finite(), "radiance must be finite, got {radiance}");
        debug_assert!(
            radiance.r >= 0.0 && radiance.g >= 0.0 && radiance.b >= 0.0,
            "radiance must be non-negative, got {radiance}"
        );
        radiance
    }

    fn trace(
        &self,
        mut ray: Ray,
        sampler: &mut Sampler,
        reused_emitter: Option<(u32, f64, Point)>,
    ) -> Color {
        let mut accumulated = Color::BLACK;
        let mut throughput = Color::WHITE;
        let mut previous_specular = true;
        let mut all_specular_so_far = true;

        for depth in 0..self.config.max_path_length {
            let intersection = match self.scene.intersect(&ray) {
                Some(intersection) => intersection,
                None => {
                    if let Some(environment) = self.scene.environment() {
                        accumulated += throughput * environment.radiance(ray.origin, -ray.direction);
                    }
                    break;
                }
            };
            let material = self.scene.material(intersection.material_id);

            if let Some(emitter_id) = material.emitter_id() {
                let counts_towards_image = depth == 0
                    || all_specular_so_far
                    || previous_specular
                    || reused_emitter.is_none();
                if counts_towards_image {
                    let emitter = self.scene.emitter(emitter_id);
                    let direction_away = -intersection.direction_in;
                    accumulated += throughput * emitter.radiance(intersection.point, direction_away);
                }
                break;
            }

            let sample = material.sample(&intersection, sampler);
            if sample.event == Event::None {
                break;
            }

            if sample.event == Event::Diffuse {
                if let Some((emitter_id, select_pdf, emitter_point)) = reused_emitter {
                    accumulated += throughput
                        * self.sample_direct_light(
                            &intersection,
                            &ray,
                            material,
                            emitter_id,
                            select_pdf,
                            emitter_point,
                        );
                }
            }

            match sample.event {
                Event::Reflect => {
                    throughput *= sample.colour;
                }
                Event::Diffuse => {
                    throughput *= sample.colour * (sample.cos_theta / sample.pdf_w);
                }
                Event::Emission | Event::None => unreachable!("handled above"),
            }

            previous_specular = sample.event == Event::Reflect;
            all_specular_so_far = all_specular_so_far && previous_specular;
            if throughput.is_black() {
                break;
            }
            ray = Ray::new(intersection.point, sample.direction, EPSILON_RAY);
        }

        accumulated
    }

    /// One NEE shadow-ray sample: evaluates the surface BSDF towards the
    /// path's reused point on the reused emitter and weights it by the
    /// emitter's solid-angle density. Returns `Color::BLACK` if the light is
    /// occluded or on the wrong side of either surface.
    fn sample_direct_light(
        &self,
        intersection: &crate::intersection::Intersection,
        incoming_ray: &Ray,
        material: &crate::material::Material,
        emitter_id: u32,
        select_pdf: f64,
        point_on_emitter: Point,
    ) -> Color {
        let emitter = self.scene.emitter(emitter_id);
        let to_emitter = point_on_emitter - intersection.point;
        let distance = to_emitter.magnitude();
        if distance < EPSILON_RAY {
            return Color::BLACK;
        }
        let direction_to_emitter = to_emitter / distance;

        let w_o = -incoming_ray.direction;
        let (bsdf_colour, _bsdf_pdf_w, cos_theta_surface) =
            material.evaluate(&direction_to_emitter, &w_o, intersection);
        if cos_theta_surface <= 0.0 {
            return Color::BLACK;
        }

        let (pdf_area, cos_theta_emitter) = emitter.pdf_le(point_on_emitter, -direction_to_emitter);
        if pdf_area <= 0.0 {
            return Color::BLACK;
        }

        let shadow_ray = Ray::new(intersection.point, direction_to_emitter, EPSILON_RAY);
        if self.scene.occluded(&shadow_ray, distance - 2.0 * EPSILON_RAY) {
            return Color::BLACK;
        }

        let pdf_w = pdf_area * distance * distance / cos_theta_emitter * select_pdf;
        let radiance = emitter.radiance(point_on_emitter, -direction_to_emitter);
        bsdf_colour * radiance * (cos_theta_surface / pdf_w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        color::Color,
        config::RenderConfig,
        geometry::{point::Point, vector::Vector},
        material::Material,
        scene::SceneBuilder,
        sensor::Sensor,
        shape::Shape,
    };
    use std::sync::Mutex;

    fn basic_config(enable_nee: bool) -> RenderConfig {
        RenderConfig {
            image_width: 4,
            image_height: 4,
            max_path_length: 4,
            max_samples: 1,
            enable_nee,
        }
    }

    fn camera_looking_at_origin() -> PinholeCamera {
        PinholeCamera::new(Point::new(0, 0, 5), Point::O, Vector::Y, 40.0, 4, 4)
    }

    #[test]
    fn empty_direction_yields_black() {
        let mut builder = SceneBuilder::new();
        let emitter = builder.add_emitter(crate::emitter::Emitter::new_triangle(
            Point::new(999, -1, -50),
            Point::new(1001, -1, -50),
            Point::new(1000, 1, -50),
            Color::WHITE,
        ));
        let material = builder.add_material(Material::Emissive { emitter_id: emitter });
        builder.add_primitive(
            Shape::Triangle {
                a: Point::new(999, -1, -50),
                b: Point::new(1001, -1, -50),
                c: Point::new(1000, 1, -50),
            },
            material,
        );
        let scene = builder.build().unwrap();
        let camera = camera_looking_at_origin();
        let config = basic_config(false);
        let sensor = Mutex::new(Sensor::new(4, 4, 1).unwrap());
        let integrator = PathIntegrator::new(&camera, &scene, &sensor, config);
        // the emitter sits far outside any pixel's view frustum.
        integrator.estimate(0, 0);
        assert_eq!(sensor.lock().unwrap().read(0, 0), Color::BLACK);
    }

    #[test]
    fn direct_view_of_emitter_returns_its_radiance() {
        let mut builder = SceneBuilder::new();
        let emitter = builder.add_emitter(crate::emitter::Emitter::new_triangle(
            Point::new(-100, -100, 0),
            Point::new(100, -100, 0),
            Point::new(0, 100, 0),
            Color::from_rgb(255, 255, 255),
        ));
        let emitter_material = builder.add_material(Material::Emissive { emitter_id: emitter });
        builder.add_primitive(
            Shape::Triangle {
                a: Point::new(-100, -100, 0),
                b: Point::new(100, -100, 0),
                c: Point::new(0, 100, 0),
            },
            emitter_material,
        );
        let scene = builder.build().unwrap();
        let camera = camera_looking_at_origin();
        let config = basic_config(true);
        let sensor = Mutex::new(Sensor::new(4, 4, 1).unwrap());
        let integrator = PathIntegrator::new(&camera, &scene, &sensor, config);
        integrator.estimate(2, 2);
        assert_eq!(sensor.lock().unwrap().read(2, 2), Color::WHITE);
    }

    #[test]
    fn occluded_light_contributes_nothing_via_nee_alone() {
        // A diffuse floor facing away from a light directly behind it: NEE
        // must reject the sample on the cos_theta_surface <= 0 branch, and
        // no ray ever reaches the light by chance because the floor's
        // cosine-weighted hemisphere never points through the surface.
        let mut builder = SceneBuilder::new();
        let floor_material = builder.add_material(Material::Lambertian {
            reflectance: Color::from_rgb(200, 200, 200),
        });
        let emitter = builder.add_emitter(crate::emitter::Emitter::new_triangle(
            Point::new(-1, -1, -10),
            Point::new(1, -1, -10),
            Point::new(0, 1, -10),
            Color::WHITE,
        ));
        builder.add_primitive(
            Shape::Triangle {
                a: Point::new(-100, -100, 1),
                b: Point::new(100, -100, 1),
                c: Point::new(0, 100, 1),
            },
            floor_material,
        );
        let _ = emitter;
        let scene = builder.build().unwrap();
        let camera = PinholeCamera::new(Point::new(0, 0, 5), Point::new(0, 0, 1), Vector::Y, 10.0, 2, 2);
        let config = basic_config(true);
        let sensor = Mutex::new(Sensor::new(2, 2, 1).unwrap());
        let integrator = PathIntegrator::new(&camera, &scene, &sensor, config);
        integrator.estimate(1, 1);
        assert_eq!(sensor.lock().unwrap().read(1, 1), Color::BLACK);
    }

    #[test]
    fn escaped_ray_picks_up_environment_radiance() {
        let mut builder = SceneBuilder::new();
        // A scene still needs at least one real primitive and emitter to
        // build; place them far outside the camera's reach so every ray
        // escapes and falls back to the environment.
        let backdrop = builder.add_emitter(crate::emitter::Emitter::Environment {
            radiance: Color::from_rgb(10, 20, 30),
        });
        let far_emitter = builder.add_emitter(crate::emitter::Emitter::new_triangle(
            Point::new(9000, 9000, 9000),
            Point::new(9001, 9000, 9000),
            Point::new(9000, 9001, 9000),
            Color::WHITE,
        ));
        let far_material = builder.add_material(Material::Emissive { emitter_id: far_emitter });
        builder.add_primitive(
            Shape::Triangle {
                a: Point::new(9000, 9000, 9000),
                b: Point::new(9001, 9000, 9000),
                c: Point::new(9000, 9001, 9000),
            },
            far_material,
        );
        builder.set_environment(backdrop);
        let scene = builder.build().unwrap();
        let camera = camera_looking_at_origin();
        let config = basic_config(false);
        let sensor = Mutex::new(Sensor::new(4, 4, 1).unwrap());
        let integrator = PathIntegrator::new(&camera, &scene, &sensor, config);
        integrator.estimate(0, 0);
        assert_eq!(sensor.lock().unwrap().read(0, 0), Color::from_rgb(10, 20, 30));
    }

    #[test]
    fn estimate_is_deterministic_for_a_fixed_pixel() {
        let mut builder = SceneBuilder::new();
        let material = builder.add_material(Material::Lambertian {
            reflectance: Color::from_rgb(180, 180, 180),
        });
        let emitter = builder.add_emitter(crate::emitter::Emitter::new_triangle(
            Point::new(-1, 3, -1),
            Point::new(1, 3, -1),
            Point::new(0, 3, 1),
            Color::from_rgb(255, 255, 255),
        ));
        builder.add_primitive(
            Shape::Sphere {
                center: Point::O,
                radius: 1.0,
            },
            material,
        );
        let _ = emitter;
        let scene = builder.build().unwrap();
        let camera = camera_looking_at_origin();
        let config = basic_config(true);
        let sensor_a = Mutex::new(Sensor::new(4, 4, 1).unwrap());
        let sensor_b = Mutex::new(Sensor::new(4, 4, 1).unwrap());
        let integrator_a = PathIntegrator::new(&camera, &scene, &sensor_a, config);
        let integrator_b = PathIntegrator::new(&camera, &scene, &sensor_b, config);

        integrator_a.estimate(2, 2);
        integrator_b.estimate(2, 2);
        assert_eq!(sensor_a.lock().unwrap().read(2, 2), sensor_b.lock().unwrap().read(2, 2));
    }
}
