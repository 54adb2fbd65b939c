//! Decode, sharpen and re-encode a queue of files.
//!
//! Every file is handled on its own: a file that fails to decode or encode
//! is reported in its [`BatchOutcome`] and the rest of the queue carries on.

use crate::{
    ImageSharpenResult,
    codec::{self, OutputFormat, Quality},
    kernel::Intensity,
    sharpen::sharpen,
};
use derivative::Derivative;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;

const OUTPUT_SUFFIX: &str = "_sharpened";
const FALLBACK_STEM: &str = "image";

#[derive(Debug, Clone, Copy, PartialEq, Derivative, Setters, Serialize, Deserialize)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct SharpenOptions {
    #[derivative(Default(value = "Intensity::Medium"))]
    pub intensity: Intensity,

    #[derivative(Default(value = "OutputFormat::Jpeg"))]
    pub output_format: OutputFormat,

    #[derivative(Default(value = "Quality::DEFAULT"))]
    pub quality: Quality,
}

impl SharpenOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone)]
pub struct BatchInput {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl BatchInput {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharpenedImage {
    pub file_name: String,
    pub mime: &'static str,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

#[derive(Debug)]
pub struct BatchOutcome {
    /// Name of the input this outcome belongs to.
    pub file_name: String,
    pub result: ImageSharpenResult<SharpenedImage>,
}

impl BatchOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Name for a sharpened download: `photo.png` becomes `photo_sharpened.jpg`
/// when the target is JPEG.
///
/// Only the final extension is replaced and leading directories are
/// dropped. Names without an extension, or ending in a bare `.`, get the
/// suffix appended.
pub fn output_file_name(original: &str, format: OutputFormat) -> String {
    let name = Path::new(original)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default();

    let stem = match name.rfind('.') {
        Some(idx) if idx + 1 < name.len() => &name[..idx],
        _ => name,
    };
    let stem = if stem.trim().is_empty() {
        FALLBACK_STEM
    } else {
        stem
    };

    format!("{stem}{OUTPUT_SUFFIX}.{}", format.extension())
}

pub fn sharpen_image(
    file_name: &str,
    bytes: &[u8],
    options: &SharpenOptions,
) -> ImageSharpenResult<SharpenedImage> {
    let source = codec::decode(bytes)?;
    let sharpened = sharpen(&source, options.intensity)?;
    let data = codec::encode(&sharpened, options.output_format, options.quality)?;

    Ok(SharpenedImage {
        file_name: output_file_name(file_name, options.output_format),
        mime: options.output_format.mime(),
        width: sharpened.width(),
        height: sharpened.height(),
        data,
    })
}

pub fn sharpen_batch(
    inputs: impl IntoIterator<Item = BatchInput>,
    options: &SharpenOptions,
) -> Vec<BatchOutcome> {
    inputs
        .into_iter()
        .map(|input| {
            let result = sharpen_image(&input.file_name, &input.bytes, options);
            match &result {
                Ok(image) => log::info!(
                    "Sharpened {} -> {} ({}x{}, {} bytes)",
                    input.file_name,
                    image.file_name,
                    image.width,
                    image.height,
                    image.data.len()
                ),
                Err(e) => log::warn!("Failed to sharpen {}: {e}", input.file_name),
            }

            BatchOutcome {
                file_name: input.file_name,
                result,
            }
        })
        .collect()
}
