//! Umbra renderer - CPU diffuse path tracing.
//!
//! Casts jittered rays from a pinhole camera through every pixel, bounces
//! them diffusely off spheres and averages the sky light they gather.
//!
//! # Example
//!
//! ```no_run
//! use umbra_renderer::{render_to, scene, Camera, PpmWriter, RenderConfig};
//!
//! let config = RenderConfig { seed: Some(1), ..RenderConfig::default() };
//! let world = scene::two_spheres();
//! let mut rng = config.rng();
//! let mut sink = PpmWriter::new(std::io::stdout().lock());
//! render_to(&mut sink, &Camera::new(), &world, &config, &mut rng)?;
//! # Ok::<(), umbra_renderer::OutputError>(())
//! ```

mod camera;
mod error;
mod hittable;
mod output;
mod renderer;
pub mod sampling;
pub mod scene;
mod sphere;

pub use camera::Camera;
pub use error::{ConfigError, OutputError, OutputResult};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use output::{ImageSink, PngWriter, PpmWriter, MAX_CHANNEL_VALUE};
pub use renderer::{
    color_to_rgb, linear_to_gamma, ray_color, render, render_pixel, render_to, sky_gradient,
    ImageBuffer, RenderConfig, DISPLAY_SCALE, MAX_DEPTH_LIMIT,
};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from umbra_math
pub use umbra_math::{Color, Interval, Ray, Vec3};
