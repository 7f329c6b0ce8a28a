//! Umbra math types.
//!
//! Vector algebra comes from `glam`; `Vec3` doubles as an RGB color
//! (x/y/z alias r/g/b). On top of it this crate adds the ray and the
//! parametric interval used by intersection queries.

// Re-export glam for convenience
pub use glam::*;

mod interval;
mod ray;

pub use interval::Interval;
pub use ray::Ray;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;
