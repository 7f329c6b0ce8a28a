//! Image emitters.
//!
//! A sink receives the image size once, then exactly `width * height`
//! RGB triples, top row first and left to right within a row.

use std::io::Write;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};

use crate::error::{OutputError, OutputResult};

/// Maximum channel value written in image headers.
pub const MAX_CHANNEL_VALUE: u8 = 255;

/// Consumer of rendered pixels.
pub trait ImageSink {
    /// Start an image of the given size.
    fn begin(&mut self, width: u32, height: u32) -> OutputResult<()>;

    /// Append the next pixel in emission order.
    fn write_pixel(&mut self, rgb: [u8; 3]) -> OutputResult<()>;

    /// Finish the image. Fails if the pixel count does not match the size.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Pixel bookkeeping shared by the sinks.
#[derive(Debug, Default, Clone, Copy)]
struct Progress {
    expected: Option<u64>,
    written: u64,
}

impl Progress {
    fn begin(&mut self, width: u32, height: u32) -> OutputResult<()> {
        if width == 0 || height == 0 {
            return Err(OutputError::Dimensions { width, height });
        }
        self.expected = Some(width as u64 * height as u64);
        self.written = 0;
        Ok(())
    }

    fn advance(&mut self) -> OutputResult<u64> {
        let expected = self.expected.ok_or(OutputError::NotStarted)?;
        if self.written >= expected {
            return Err(OutputError::PixelCount {
                expected,
                actual: self.written + 1,
            });
        }
        let index = self.written;
        self.written += 1;
        Ok(index)
    }

    fn finish(&self) -> OutputResult<()> {
        let expected = self.expected.ok_or(OutputError::NotStarted)?;
        if self.written != expected {
            return Err(OutputError::PixelCount {
                expected,
                actual: self.written,
            });
        }
        Ok(())
    }
}

/// Plain-text PPM (`P3`) writer.
///
/// Writes the three header lines `P3`, `<width> <height>` and `255`,
/// then one `r g b` line per pixel.
pub struct PpmWriter<W: Write> {
    writer: W,
    progress: Progress,
}

impl<W: Write> PpmWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            progress: Progress::default(),
        }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ImageSink for PpmWriter<W> {
    fn begin(&mut self, width: u32, height: u32) -> OutputResult<()> {
        self.progress.begin(width, height)?;
        writeln!(self.writer, "P3")?;
        writeln!(self.writer, "{} {}", width, height)?;
        writeln!(self.writer, "{}", MAX_CHANNEL_VALUE)?;
        Ok(())
    }

    fn write_pixel(&mut self, rgb: [u8; 3]) -> OutputResult<()> {
        self.progress.advance()?;
        writeln!(self.writer, "{} {} {}", rgb[0], rgb[1], rgb[2])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.progress.finish()?;
        self.writer.flush()?;
        Ok(())
    }
}

/// PNG writer; buffers the image and encodes it on `finish`.
pub struct PngWriter {
    path: PathBuf,
    image: RgbImage,
    progress: Progress,
}

impl PngWriter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            image: RgbImage::new(0, 0),
            progress: Progress::default(),
        }
    }
}

impl ImageSink for PngWriter {
    fn begin(&mut self, width: u32, height: u32) -> OutputResult<()> {
        self.progress.begin(width, height)?;
        self.image = RgbImage::new(width, height);
        Ok(())
    }

    fn write_pixel(&mut self, rgb: [u8; 3]) -> OutputResult<()> {
        let index = self.progress.advance()?;
        let width = self.image.width() as u64;
        let x = (index % width) as u32;
        let y = (index / width) as u32;
        self.image.put_pixel(x, y, Rgb(rgb));
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.progress.finish()?;
        self.image.save_with_format(&self.path, image::ImageFormat::Png)?;
        log::debug!("Encoded {}x{} PNG", self.image.width(), self.image.height());
        Ok(())
    }
}
