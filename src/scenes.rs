//! Demo scenes for the CLI binary and for grounding integration tests.
//! There is no textual scene description format in this crate; every
//! scene here is assembled directly via `SceneBuilder`.

use crate::{
    color::Color,
    emitter::Emitter,
    error::Result,
    geometry::point::Point,
    material::Material,
    scene::{Scene, SceneBuilder},
    shape::Shape,
};

/// A Cornell-box-style enclosure: five walls, a small area light set into
/// the ceiling, and a mirror sphere resting on the floor. Two triangles per
/// wall.
pub fn cornell_box() -> Result<Scene> {
    let mut builder = SceneBuilder::new();

    let white = builder.add_material(Material::Lambertian {
        reflectance: Color::from_rgb(200, 200, 200),
    });
    let red = builder.add_material(Material::Lambertian {
        reflectance: Color::from_rgb(200, 40, 40),
    });
    let green = builder.add_material(Material::Lambertian {
        reflectance: Color::from_rgb(40, 200, 40),
    });

    let light_a = Point::new(-1, 5, -1);
    let light_b = Point::new(1, 5, -1);
    let light_c = Point::new(1, 5, 1);
    let light_d = Point::new(-1, 5, 1);
    let light_radiance = Color::from_rgb(255, 240, 220) * 15.0;

    let light_emitter_a = builder.add_emitter(Emitter::new_triangle(light_a, light_b, light_c, light_radiance));
    let light_material_a = builder.add_material(Material::Emissive {
        emitter_id: light_emitter_a,
    });
    let light_emitter_b = builder.add_emitter(Emitter::new_triangle(light_a, light_c, light_d, light_radiance));
    let light_material_b = builder.add_material(Material::Emissive {
        emitter_id: light_emitter_b,
    });
    builder.add_primitive(
        Shape::Triangle {
            a: light_a,
            b: light_b,
            c: light_c,
        },
        light_material_a,
    );
    builder.add_primitive(
        Shape::Triangle {
            a: light_a,
            b: light_c,
            c: light_d,
        },
        light_material_b,
    );

    // floor / ceiling / back wall: white. left wall: red. right wall: green.
    add_quad(
        &mut builder,
        Point::new(-5, 0, -5),
        Point::new(5, 0, -5),
        Point::new(5, 0, 5),
        Point::new(-5, 0, 5),
        white,
    );
    add_quad(
        &mut builder,
        Point::new(-5, 10, 5),
        Point::new(5, 10, 5),
        Point::new(5, 10, -5),
        Point::new(-5, 10, -5),
        white,
    );
    add_quad(
        &mut builder,
        Point::new(-5, 0, -5),
        Point::new(-5, 10, -5),
        Point::new(5, 10, -5),
        Point::new(5, 0, -5),
        white,
    );
    add_quad(
        &mut builder,
        Point::new(-5, 0, 5),
        Point::new(-5, 0, -5),
        Point::new(-5, 10, -5),
        Point::new(-5, 10, 5),
        red,
    );
    add_quad(
        &mut builder,
        Point::new(5, 0, -5),
        Point::new(5, 0, 5),
        Point::new(5, 10, 5),
        Point::new(5, 10, -5),
        green,
    );

    let sphere_material = builder.add_material(Material::Mirror {
        reflectance: Color::from_rgb(230, 230, 230),
    });
    builder.add_primitive(
        Shape::Sphere {
            center: Point::new(0, 2, 0),
            radius: 2.0,
        },
        sphere_material,
    );

    builder.build()
}

/// Adds a planar quad as two triangles, in counter-clockwise winding order
/// as seen from the side the normal should face.
fn add_quad(builder: &mut SceneBuilder, a: Point, b: Point, c: Point, d: Point, material_id: u32) {
    builder.add_primitive(Shape::Triangle { a, b, c }, material_id);
    builder.add_primitive(Shape::Triangle { a, b: c, c: d }, material_id);
}
