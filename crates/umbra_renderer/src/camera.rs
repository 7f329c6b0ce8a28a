//! Camera for ray generation.

use umbra_math::{Ray, Vec3};

/// Pinhole camera looking through a rectangular image plane.
///
/// The plane is described by its lower-left corner and the two spans
/// covering it. `get_ray(u, v)` with `u, v` in [0, 1] sweeps the plane
/// from left to right and bottom to top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
}

impl Camera {
    /// Create a camera at the origin looking down -Z through a 4x2 plane
    /// at distance 1.
    pub fn new() -> Self {
        Self::from_plane(Vec3::ZERO, -1.0, 2.0, 4.0)
    }

    /// Create a camera from its raw basis vectors.
    pub fn from_basis(origin: Vec3, lower_left_corner: Vec3, horizontal: Vec3, vertical: Vec3) -> Self {
        Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
        }
    }

    /// Create an axis-aligned camera at `position` whose image plane sits
    /// `distance` along Z (negative looks down -Z) with the given size.
    pub fn from_plane(position: Vec3, distance: f32, height: f32, width: f32) -> Self {
        let horizontal = Vec3::new(width, 0.0, 0.0);
        let vertical = Vec3::new(0.0, height, 0.0);
        let lower_left_corner = position + Vec3::new(-width / 2.0, -height / 2.0, distance);

        Self::from_basis(position, lower_left_corner, horizontal, vertical)
    }

    /// Create a positionable camera.
    ///
    /// `vfov` is the vertical field of view in degrees and `aspect` the
    /// width / height ratio of the image.
    pub fn look_at(look_from: Vec3, look_at: Vec3, vup: Vec3, vfov: f32, aspect: f32) -> Self {
        let theta = vfov.to_radians();
        let half_height = (theta / 2.0).tan();
        let half_width = aspect * half_height;

        // Orthonormal basis, w points away from the view direction
        let w = (look_from - look_at).normalize();
        let u = vup.cross(w).normalize();
        let v = w.cross(u);

        let lower_left_corner = look_from - half_width * u - half_height * v - w;

        Self::from_basis(look_from, lower_left_corner, 2.0 * half_width * u, 2.0 * half_height * v)
    }

    /// Move the camera while keeping its image plane at the same offset.
    pub fn with_origin(mut self, origin: Vec3) -> Self {
        let offset = origin - self.origin;
        self.origin = origin;
        self.lower_left_corner += offset;
        self
    }

    /// Ray from the camera origin through the plane at (u, v).
    pub fn get_ray(&self, u: f32, v: f32) -> Ray {
        let direction =
            self.lower_left_corner + u * self.horizontal + v * self.vertical - self.origin;
        Ray::new(self.origin, direction)
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn lower_left_corner(&self) -> Vec3 {
        self.lower_left_corner
    }

    pub fn horizontal(&self) -> Vec3 {
        self.horizontal
    }

    pub fn vertical(&self) -> Vec3 {
        self.vertical
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
