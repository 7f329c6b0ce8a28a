use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use umbra_renderer::{render_to, Camera, ImageSink, PngWriter, PpmWriter, Vec3};

mod cli;

use cli::Args;

/// Pick the sink for `path`: PNG by extension, PPM otherwise, stdout when
/// no path is given.
fn open_sink(path: Option<&Path>) -> Result<Box<dyn ImageSink>> {
    let Some(path) = path else {
        return Ok(Box::new(PpmWriter::new(BufWriter::new(io::stdout().lock()))));
    };

    let is_png = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if is_png {
        return Ok(Box::new(PngWriter::new(path)));
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    Ok(Box::new(PpmWriter::new(BufWriter::new(file))))
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting Umbra");

    let config = args.render_config()?;
    let world = args.scene.build();
    log::info!("Scene {:?} with {} objects", args.scene, world.len());

    // Plane height 2 at distance 1; width follows the image aspect
    let aspect = config.width as f32 / config.height as f32;
    let camera = Camera::from_plane(Vec3::ZERO, -1.0, 2.0, 2.0 * aspect);

    let mut rng = config.rng();
    let mut sink = open_sink(args.output.as_deref())?;
    render_to(sink.as_mut(), &camera, &world, &config, &mut rng).context("Failed to write image")?;

    if let Some(path) = &args.output {
        log::info!("Saved to {}", path.display());
    }

    Ok(())
}
