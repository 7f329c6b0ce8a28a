//! Random sampling helpers.
//!
//! Every function draws from an explicit generator so a render seeded with
//! the same value replays the same sample sequence.

use rand::{Rng, RngCore};
use umbra_math::Vec3;

/// Upper bound on rejection-sampling draws before falling back to a
/// boundary point.
pub const MAX_REJECTION_ATTEMPTS: u32 = 64;

/// Uniform f32 in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Uniform f32 in [min, max).
#[inline]
pub fn gen_range_f32(rng: &mut dyn RngCore, min: f32, max: f32) -> f32 {
    min + (max - min) * gen_f32(rng)
}

/// Random point uniformly distributed inside the unit sphere.
///
/// Draws candidates from the [-1, 1] cube until one lands inside, about
/// 1.9 draws on average. After `MAX_REJECTION_ATTEMPTS` misses the last
/// candidate is projected onto the sphere boundary.
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    let mut candidate = Vec3::ZERO;
    for _ in 0..MAX_REJECTION_ATTEMPTS {
        candidate = Vec3::new(
            gen_range_f32(rng, -1.0, 1.0),
            gen_range_f32(rng, -1.0, 1.0),
            gen_range_f32(rng, -1.0, 1.0),
        );
        if candidate.length_squared() < 1.0 {
            return candidate;
        }
    }

    log::trace!("rejection sampling exhausted, using boundary point");
    candidate.try_normalize().unwrap_or(Vec3::Y)
}

/// Sub-pixel jitter in [0, 1) x [0, 1), returned as (dx, dy).
#[inline]
pub fn pixel_jitter(rng: &mut dyn RngCore) -> (f32, f32) {
    let dx = gen_f32(rng);
    let dy = gen_f32(rng);
    (dx, dy)
}
