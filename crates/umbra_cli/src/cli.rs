use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use umbra_renderer::{scene, HittableList, RenderConfig, Vec3};

/// Log levels accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// Small sphere on a large ground sphere
    TwoSpheres,
    /// Single sphere in front of the camera
    Sphere,
    /// Nothing but sky
    Empty,
}

impl SceneKind {
    pub fn build(self) -> HittableList {
        match self {
            SceneKind::TwoSpheres => scene::two_spheres(),
            SceneKind::Sphere => scene::single_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5),
            SceneKind::Empty => HittableList::new(),
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "umbra")]
#[command(about = "Diffuse path tracer writing PPM or PNG images")]
pub struct Args {
    /// JSON render settings; command-line values override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output file (.png writes PNG, anything else PPM); stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "two-spheres")]
    pub scene: SceneKind,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of samples per pixel
    #[arg(long, short = 's')]
    pub samples_per_pixel: Option<u32>,

    /// Maximum diffuse bounces per path (at most 1024)
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Fraction of light kept per bounce (default 1.0, no darkening)
    #[arg(long)]
    pub albedo: Option<f32>,

    /// Seed for reproducible renders
    #[arg(long)]
    pub seed: Option<u64>,

    /// Gamma-correct output colors
    #[arg(long)]
    pub gamma: bool,

    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Build the render settings from the config file and overrides.
    pub fn render_config(&self) -> Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => RenderConfig::default(),
        };
        self.apply(&mut config);
        config.validate().context("Invalid render settings")?;
        Ok(config)
    }

    fn apply(&self, config: &mut RenderConfig) {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(samples) = self.samples_per_pixel {
            config.samples_per_pixel = samples;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(albedo) = self.albedo {
            config.albedo = albedo;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.gamma {
            config.gamma_correct = true;
        }
    }
}

/// Read render settings from a JSON file. Missing fields keep defaults.
pub fn load_config(path: &Path) -> Result<RenderConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    log::debug!("Loaded render settings from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["umbra"]);
        let config = args.render_config().unwrap();

        assert_eq!(config, RenderConfig::default());
        assert_eq!(args.scene, SceneKind::TwoSpheres);
        assert!(args.output.is_none());
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "umbra", "--width", "64", "--height", "32", "-s", "4", "--max-depth", "3",
            "--seed", "9", "--gamma", "--scene", "empty",
        ]);
        let config = args.render_config().unwrap();

        assert_eq!((config.width, config.height), (64, 32));
        assert_eq!(config.samples_per_pixel, 4);
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.seed, Some(9));
        assert!(config.gamma_correct);
        assert!(args.scene.build().is_empty());
    }

    #[test]
    fn test_invalid_override_rejected() {
        let args = Args::parse_from(["umbra", "--samples-per-pixel", "0"]);
        assert!(args.render_config().is_err());
    }

    #[test]
    fn test_excessive_depth_rejected() {
        let args = Args::parse_from(["umbra", "--max-depth", "1000000"]);
        let err = args.render_config().unwrap_err();
        assert!(format!("{err:#}").contains("exceeds the limit"));
    }

    #[test]
    fn test_config_file_with_override() {
        let path = std::env::temp_dir().join(format!("umbra_cli_test_{}.json", std::process::id()));
        fs::write(&path, r#"{ "width": 50, "height": 25, "samples_per_pixel": 8 }"#).unwrap();

        let args = Args::parse_from([
            OsStr::new("umbra"),
            OsStr::new("--config"),
            path.as_os_str(),
            OsStr::new("--height"),
            OsStr::new("40"),
        ]);
        let config = args.render_config();
        fs::remove_file(&path).ok();
        let config = config.unwrap();

        assert_eq!(config.width, 50);
        assert_eq!(config.height, 40);
        assert_eq!(config.samples_per_pixel, 8);
    }

    #[test]
    fn test_missing_config_file() {
        let err = load_config(Path::new("/nonexistent/umbra.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(LevelFilter::from(LogLevel::Warn), LevelFilter::Warn);
        assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::Trace);
    }
}
