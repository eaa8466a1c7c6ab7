use crate::{bounds::Bounds, intersection::Intersection, ray::Ray, shape::Shape};

/// A shape bound to a material. The scene collaborator stores a flat
/// `Vec<Primitive>`; the BVH only ever holds indices into it. A primitive is
/// an emitter exactly when its material is `Material::Emissive`, which
/// carries the emitter id directly — there is no separate per-primitive
/// emitter binding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primitive {
    pub shape: Shape,
    pub material_id: u32,
}

impl Primitive {
    pub fn bounds(&self) -> Bounds {
        self.shape.bounds()
    }

    pub fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        self.shape.intersect(ray).map(|hit| Intersection {
            point: ray.at(hit.distance),
            normal: hit.normal,
            direction_in: ray.direction,
            material_id: self.material_id,
            distance: hit.distance,
        })
    }
}
