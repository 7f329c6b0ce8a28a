//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive diffuse bounces with a configurable depth cap
//! - Sky gradient background
//! - Anti-aliasing via multi-sampling
//!
//! Pixel coordinates passed to [`render_pixel`] follow the image plane:
//! `y = 0` is the bottom row. Images are produced top row first.

use std::convert::Infallible;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use umbra_math::{Color, Interval, Ray};

use crate::error::{ConfigError, OutputResult};
use crate::output::ImageSink;
use crate::sampling::{pixel_jitter, random_in_unit_sphere};
use crate::{Camera, Hittable};

/// Scale applied to [0, 1] channels so truncation never reaches 256.
pub const DISPLAY_SCALE: f32 = 255.99;

/// Largest accepted `max_depth`; each bounce is one stack frame.
pub const MAX_DEPTH_LIMIT: u32 = 1024;

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth, at most [`MAX_DEPTH_LIMIT`]; deeper paths
    /// contribute black
    pub max_depth: u32,
    /// Minimum hit distance, keeps bounced rays off their own surface
    pub t_min: f32,
    /// Fraction of light kept at each diffuse bounce; 1.0 passes the
    /// bounced color through unchanged
    pub albedo: f32,
    /// Apply gamma 2 before quantizing
    pub gamma_correct: bool,
    /// Seed for the sample generator; `None` seeds from system entropy
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 200,
            height: 100,
            samples_per_pixel: 100,
            max_depth: 50,
            t_min: 0.001,
            albedo: 1.0,
            gamma_correct: false,
            seed: None,
        }
    }
}

impl RenderConfig {
    /// Check the settings before rendering.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        if !(self.t_min.is_finite() && self.t_min > 0.0) {
            return Err(ConfigError::InvalidTMin(self.t_min));
        }
        if !Interval::UNIT.contains(self.albedo) {
            return Err(ConfigError::InvalidAlbedo(self.albedo));
        }
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::DepthTooLarge {
                max_depth: self.max_depth,
                limit: MAX_DEPTH_LIMIT,
            });
        }
        Ok(())
    }

    /// Sample generator for a render with these settings.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Compute the color seen by a ray.
///
/// On a hit the ray scatters toward a random point in the unit sphere
/// tangent to the hit point and returns whatever that ray sees, scaled by
/// `config.albedo` (1.0 by default). A miss returns the sky gradient. At
/// `depth == 0` the path is cut and contributes black.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(config.t_min, f32::INFINITY)) else {
        return sky_gradient(ray);
    };

    let target = rec.p + rec.normal + random_in_unit_sphere(rng);
    let mut scatter_direction = target - rec.p;

    // Catch degenerate scatter direction
    if scatter_direction.length_squared() < 1e-8 {
        scatter_direction = rec.normal;
    }

    let scattered = Ray::new(rec.p, scatter_direction);
    config.albedo * ray_color(&scattered, world, depth - 1, config, rng)
}

/// Compute sky gradient background.
///
/// Blends white at the horizon-facing bottom into light blue at the top.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    (1.0 - a) * white + a * blue
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a color to 8-bit RGB.
///
/// Channels are clamped to [0, 1] (NaN counts as 0) and truncated after
/// scaling by [`DISPLAY_SCALE`].
pub fn color_to_rgb(color: Color, gamma_correct: bool) -> [u8; 3] {
    let quantize = |c: f32| {
        let c = if gamma_correct { linear_to_gamma(c) } else { c };
        (DISPLAY_SCALE * Interval::UNIT.clamp(c)) as u8
    };
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Render a single pixel with multi-sampling.
///
/// Averages `samples_per_pixel` rays jittered uniformly inside the pixel
/// footprint. `y` counts up from the bottom row.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let (dx, dy) = pixel_jitter(rng);
        let u = (x as f32 + dx) / config.width as f32;
        let v = (y as f32 + dy) / config.height as f32;

        let ray = camera.get_ray(u, v);
        pixel_color += ray_color(&ray, world, config.max_depth, config, rng);
    }

    // Average the samples
    pixel_color / config.samples_per_pixel as f32
}

/// Render buffer holding linear colors, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, row: u32) -> usize {
        row as usize * self.width as usize + x as usize
    }

    /// Get the pixel at column `x` of `row` (row 0 is the top).
    pub fn get(&self, x: u32, row: u32) -> Color {
        self.pixels[self.index(x, row)]
    }

    /// Set the pixel at column `x` of `row` (row 0 is the top).
    pub fn set(&mut self, x: u32, row: u32, color: Color) {
        let index = self.index(x, row);
        self.pixels[index] = color;
    }

    /// Send the whole image to `sink`.
    pub fn write_to(&self, sink: &mut dyn ImageSink, gamma_correct: bool) -> OutputResult<()> {
        sink.begin(self.width, self.height)?;
        for color in &self.pixels {
            sink.write_pixel(color_to_rgb(*color, gamma_correct))?;
        }
        sink.finish()
    }
}

/// Walk the image in emission order: rows from the top (`y = height - 1`)
/// down, each row left to right.
fn trace_rows<E, F>(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
    mut emit: F,
) -> Result<(), E>
where
    F: FnMut(u32, u32, Color) -> Result<(), E>,
{
    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth
    );
    let start = Instant::now();

    for y in (0..config.height).rev() {
        log::debug!("Scanlines remaining: {}", y + 1);
        for x in 0..config.width {
            let color = render_pixel(camera, world, x, y, config, rng);
            emit(x, y, color)?;
        }
    }

    log::info!("Rendered in {:?}", start.elapsed());
    Ok(())
}

/// Render the entire scene to an image buffer.
///
/// Fails without tracing anything if `config` does not validate.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Result<ImageBuffer, ConfigError> {
    config.validate()?;
    let mut image = ImageBuffer::new(config.width, config.height);
    let top = config.height.saturating_sub(1);

    trace_rows(camera, world, config, rng, |x, y, color| {
        image.set(x, top - y, color);
        Ok::<(), Infallible>(())
    })
    .unwrap_or_else(|never| match never {});

    Ok(image)
}

/// Render the scene straight into `sink`, one pixel at a time.
///
/// The config is validated before the sink sees the header.
pub fn render_to(
    sink: &mut dyn ImageSink,
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> OutputResult<()> {
    config.validate()?;
    sink.begin(config.width, config.height)?;
    trace_rows(camera, world, config, rng, |_, _, color| {
        sink.write_pixel(color_to_rgb(color, config.gamma_correct))
    })?;
    sink.finish()
}
