//! Error types for render configuration and image output.

use thiserror::Error;

/// Invalid render settings, reported by `RenderConfig::validate`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Image dimensions must be non-zero (got {width}x{height})")]
    ZeroDimension { width: u32, height: u32 },

    #[error("Samples per pixel must be at least 1")]
    ZeroSamples,

    #[error("Minimum hit distance must be positive and finite (got {0})")]
    InvalidTMin(f32),

    #[error("Albedo must be within [0, 1] (got {0})")]
    InvalidAlbedo(f32),

    #[error("Max depth {max_depth} exceeds the limit of {limit}")]
    DepthTooLarge { max_depth: u32, limit: u32 },
}

/// Errors raised while emitting an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Expected {expected} pixels, got {actual}")]
    PixelCount { expected: u64, actual: u64 },

    #[error("Pixel written before the image header")]
    NotStarted,

    #[error("Image dimensions must be non-zero (got {width}x{height})")]
    Dimensions { width: u32, height: u32 },

    #[error("Invalid render settings: {0}")]
    Config(#[from] ConfigError),
}

pub type OutputResult<T> = Result<T, OutputError>;
