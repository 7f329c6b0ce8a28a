//! Stock scenes.

use umbra_math::Vec3;

use crate::{HittableList, Sphere};

/// Radius of the ground sphere in [`two_spheres`].
pub const GROUND_RADIUS: f32 = 100.0;

/// A small sphere at (0, 0, -1) resting on a large ground sphere, framed
/// by the default camera.
pub fn two_spheres() -> HittableList {
    let mut world = HittableList::new();
    world.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5)));
    world.add(Box::new(Sphere::new(
        Vec3::new(0.0, -GROUND_RADIUS - 0.5, -1.0),
        GROUND_RADIUS,
    )));
    world
}

/// A world holding one sphere.
pub fn single_sphere(center: Vec3, radius: f32) -> HittableList {
    let mut world = HittableList::new();
    world.add(Box::new(Sphere::new(center, radius)));
    world
}
