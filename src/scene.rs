use crate::{
    bvh::Bvh,
    emitter::Emitter,
    error::{Error, Result},
    intersection::Intersection,
    material::Material,
    primitive::Primitive,
    ray::Ray,
    sampler::Sampler,
};

/// The scene collaborator: everything the integrator needs to intersect
/// rays, look up materials and emitters, and pick a light to sample for
/// NEE. Scene description parsing, mesh loading, and texture/transformation
/// support are out of scope — scenes are built programmatically via
/// `SceneBuilder`.
pub struct Scene {
    primitives: Vec<Primitive>,
    materials: Vec<Material>,
    emitters: Vec<Emitter>,
    bvh: Bvh,
    /// Queried by the integrator when a ray escapes the scene entirely.
    /// `None` means escaped rays contribute nothing.
    environment: Option<u32>,
}

impl Scene {
    /// Nearest intersection of `ray` with the scene, if any.
    pub fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let (index, _) = self.bvh.intersect(&self.primitives, ray, f64::INFINITY)?;
        self.primitives[index].intersect(ray)
    }

    /// The emitter to consult when a ray leaves the scene without hitting
    /// anything, if a background was configured.
    pub fn environment(&self) -> Option<&Emitter> {
        self.environment.map(|id| &self.emitters[id as usize])
    }

    /// True if anything lies along `ray` before `max_distance`, used by NEE
    /// to test visibility between a shading point and a sampled emitter
    /// point.
    pub fn occluded(&self, ray: &Ray, max_distance: f64) -> bool {
        self.bvh.occluded(&self.primitives, ray, max_distance)
    }

    pub fn material(&self, material_id: u32) -> &Material {
        &self.materials[material_id as usize]
    }

    pub fn emitter(&self, emitter_id: u32) -> &Emitter {
        &self.emitters[emitter_id as usize]
    }

    /// Picks an emitter uniformly at random, returning its index and the
    /// (uniform) discrete selection probability `1 / emitter_count`. A
    /// conforming NEE path calls this once per path, not once per bounce —
    /// see the integrator module for why that reuse is intentional.
    pub fn random_emitter(&self, sampler: &mut Sampler) -> (u32, f64) {
        let count = self.emitters.len();
        let index = (sampler.next() * count as f64) as usize;
        let index = index.min(count - 1);
        (index as u32, 1.0 / count as f64)
    }

    pub fn emitter_count(&self) -> usize {
        self.emitters.len()
    }
}

/// Builds a `Scene` from an in-memory description. There is no textual
/// format; callers (the demo binary, integration tests) construct a scene
/// by calling `add_material`/`add_emitter`/`add_triangle`/`add_sphere`
/// directly.
#[derive(Default)]
pub struct SceneBuilder {
    primitives: Vec<Primitive>,
    materials: Vec<Material>,
    emitters: Vec<Emitter>,
    environment: Option<u32>,
}

impl SceneBuilder {
    pub fn new() -> SceneBuilder {
        SceneBuilder::default()
    }

    pub fn add_material(&mut self, material: Material) -> u32 {
        self.materials.push(material);
        (self.materials.len() - 1) as u32
    }

    pub fn add_emitter(&mut self, emitter: Emitter) -> u32 {
        self.emitters.push(emitter);
        (self.emitters.len() - 1) as u32
    }

    pub fn add_primitive(&mut self, shape: crate::shape::Shape, material_id: u32) {
        self.primitives.push(Primitive { shape, material_id });
    }

    /// Designates a previously added emitter (ordinarily an `Environment`
    /// variant) as the background queried for rays that escape the scene.
    pub fn set_environment(&mut self, emitter_id: u32) {
        self.environment = Some(emitter_id);
    }

    pub fn build(self) -> Result<Scene> {
        if self.primitives.is_empty() {
            return Err(Error::EmptyScene("no primitives".to_string()));
        }
        if self.emitters.is_empty() {
            return Err(Error::EmptyScene("no emitters".to_string()));
        }
        log::debug!(
            "building scene: {} primitives, {} materials, {} emitters",
            self.primitives.len(),
            self.materials.len(),
            self.emitters.len()
        );
        let bvh = Bvh::build(&self.primitives);
        Ok(Scene {
            primitives: self.primitives,
            materials: self.materials,
            emitters: self.emitters,
            bvh,
            environment: self.environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{color::Color, geometry::point::Point, shape::Shape};

    fn single_triangle_scene() -> Scene {
        let mut builder = SceneBuilder::new();
        let emitter = builder.add_emitter(Emitter::new_triangle(
            Point::new(-1, -1, 0),
            Point::new(1, -1, 0),
            Point::new(0, 1, 0),
            Color::WHITE,
        ));
        let material = builder.add_material(Material::Emissive { emitter_id: emitter });
        builder.add_primitive(
            Shape::Triangle {
                a: Point::new(-1, -1, 0),
                b: Point::new(1, -1, 0),
                c: Point::new(0, 1, 0),
            },
            material,
        );
        builder.build().unwrap()
    }

    #[test]
    fn empty_scene_is_rejected() {
        assert!(SceneBuilder::new().build().is_err());
    }

    #[test]
    fn scene_without_emitters_is_rejected() {
        let mut builder = SceneBuilder::new();
        let material = builder.add_material(Material::Lambertian {
            reflectance: Color::WHITE,
        });
        builder.add_primitive(
            Shape::Sphere {
                center: Point::O,
                radius: 1.0,
            },
            material,
        );
        assert!(builder.build().is_err());
    }

    #[test]
    fn intersect_finds_the_triangle() {
        let scene = single_triangle_scene();
        let ray = Ray::new(
            Point::new(0, 0, 5),
            crate::geometry::vector::Vector(0.0, 0.0, -1.0),
            crate::constants::EPSILON_RAY,
        );
        assert!(scene.intersect(&ray).is_some());
    }

    #[test]
    fn random_emitter_is_in_range() {
        let scene = single_triangle_scene();
        let mut sampler = Sampler::for_pixel(0, 0);
        for _ in 0..16 {
            let (index, pdf) = scene.random_emitter(&mut sampler);
            assert_eq!(index, 0);
            assert_eq!(pdf, 1.0);
        }
    }
}
