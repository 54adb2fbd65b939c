//! Decoding uploads into [`PixelBuffer`]s and encoding results back out.
//!
//! JPEG output is written as RGB since the container has no alpha; PNG and
//! WebP keep all four channels. The WebP encoder available in pure Rust is
//! lossless only, so quality is honoured for JPEG alone.

use crate::{ImageSharpenError, ImageSharpenResult, pixel_buffer::PixelBuffer};
use image::{
    DynamicImage, ExtendedColorType, ImageEncoder,
    codecs::{jpeg::JpegEncoder, png::PngEncoder, webp::WebPEncoder},
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    #[serde(alias = "jpg")]
    Jpeg,
    Png,
    Webp,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
            OutputFormat::Webp => "webp",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
            OutputFormat::Webp => "image/webp",
        }
    }

    /// Whether the encoder makes use of [`Quality`].
    pub fn is_lossy(&self) -> bool {
        matches!(self, OutputFormat::Jpeg)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Png => "png",
            OutputFormat::Webp => "webp",
        })
    }
}

impl FromStr for OutputFormat {
    type Err = ImageSharpenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            "png" => Ok(OutputFormat::Png),
            "webp" => Ok(OutputFormat::Webp),
            other => Err(ImageSharpenError::InvalidParameter(format!(
                "unsupported output format: {other}"
            ))),
        }
    }
}

/// Encoder quality as a fraction in `(0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Quality(f32);

impl Quality {
    pub const DEFAULT: Quality = Quality(0.92);

    pub fn new(value: f32) -> ImageSharpenResult<Self> {
        if value.is_finite() && value > 0.0 && value <= 1.0 {
            Ok(Self(value))
        } else {
            Err(ImageSharpenError::InvalidParameter(format!(
                "quality must be in (0.0, 1.0], got {value}"
            )))
        }
    }

    pub fn value(&self) -> f32 {
        self.0
    }

    /// The 1-100 scale used by the JPEG encoder.
    pub fn percent(&self) -> u8 {
        (self.0 * 100.0).round().clamp(1.0, 100.0) as u8
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f32> for Quality {
    type Error = ImageSharpenError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quality> for f32 {
    fn from(quality: Quality) -> Self {
        quality.0
    }
}

impl FromStr for Quality {
    type Err = ImageSharpenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().parse::<f32>().map_err(|e| {
            ImageSharpenError::InvalidParameter(format!("invalid quality {s:?}: {e}"))
        })?;
        Self::new(value)
    }
}

/// Decode any container the `image` crate recognises from its magic bytes.
pub fn decode(bytes: &[u8]) -> ImageSharpenResult<PixelBuffer> {
    if bytes.is_empty() {
        return Err(ImageSharpenError::InvalidParameter(
            "input image is empty".to_string(),
        ));
    }

    let format = image::guess_format(bytes)?;
    let decoded = image::load_from_memory_with_format(bytes, format)?;
    log::debug!(
        "decoded {:?} image {}x{}",
        format,
        decoded.width(),
        decoded.height()
    );

    Ok(PixelBuffer::from(decoded.to_rgba8()))
}

/// Encode `buffer` as `format`.
///
/// JPEG drops the alpha channel as-is: transparent pixels keep their stored
/// RGB instead of being flattened onto black.
pub fn encode(
    buffer: &PixelBuffer,
    format: OutputFormat,
    quality: Quality,
) -> ImageSharpenResult<Vec<u8>> {
    let (width, height) = buffer.dimensions();
    let mut out = Vec::new();

    match format {
        OutputFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(buffer.clone().into_rgba_image()?).to_rgb8();
            JpegEncoder::new_with_quality(&mut out, quality.percent()).write_image(
                rgb.as_raw(),
                width,
                height,
                ExtendedColorType::Rgb8,
            )?;
        }
        OutputFormat::Png => {
            PngEncoder::new(&mut out).write_image(
                buffer.as_raw(),
                width,
                height,
                ExtendedColorType::Rgba8,
            )?;
        }
        OutputFormat::Webp => {
            WebPEncoder::new_lossless(&mut out).write_image(
                buffer.as_raw(),
                width,
                height,
                ExtendedColorType::Rgba8,
            )?;
        }
    }

    log::debug!("encoded {width}x{height} as {format}: {} bytes", out.len());
    Ok(out)
}
