//! 3x3 convolution sharpening with clamp-to-edge sampling.

use crate::{
    Effect, ImageSharpenError, ImageSharpenResult,
    kernel::{Intensity, Kernel},
    pixel_buffer::{CHANNELS, PixelBuffer},
};
use derivative::Derivative;
use derive_setters::Setters;
use rayon::prelude::*;

/// Sharpen effect configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct SharpenConfig {
    #[derivative(Default(value = "Intensity::Medium"))]
    intensity: Intensity,
}

impl SharpenConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intensity(&self) -> Intensity {
        self.intensity
    }
}

impl Effect for SharpenConfig {
    fn apply(&self, source: &PixelBuffer) -> ImageSharpenResult<PixelBuffer> {
        sharpen(source, self.intensity)
    }
}

/// Sharpen `source` with the kernel bound to `intensity`.
///
/// Returns a new buffer of the same size. RGB channels are convolved
/// independently; neighbours outside the image are taken from the nearest
/// edge pixel. Alpha is copied through untouched.
///
/// # Errors
/// [`ImageSharpenError::InvalidInput`] if either dimension is zero.
pub fn sharpen(source: &PixelBuffer, intensity: Intensity) -> ImageSharpenResult<PixelBuffer> {
    if source.is_empty() {
        return Err(ImageSharpenError::InvalidInput {
            width: source.width(),
            height: source.height(),
        });
    }

    log::debug!(
        "sharpen {}x{} with {} intensity",
        source.width(),
        source.height(),
        intensity
    );

    Ok(convolve(source, intensity.kernel()))
}

fn convolve(source: &PixelBuffer, kernel: &Kernel) -> PixelBuffer {
    let width = source.width() as usize;
    let height = source.height() as usize;
    let src = source.as_raw();
    let row_stride = width * CHANNELS;

    let mut dst = vec![0u8; src.len()];
    dst.par_chunks_exact_mut(row_stride)
        .enumerate()
        .for_each(|(y, row)| convolve_row(src, width, height, y, kernel, row));

    PixelBuffer::from_parts(source.width(), source.height(), dst)
}

fn convolve_row(
    src: &[u8],
    width: usize,
    height: usize,
    y: usize,
    kernel: &Kernel,
    row: &mut [u8],
) {
    let rows = [y.saturating_sub(1), y, (y + 1).min(height - 1)];

    for x in 0..width {
        let cols = [x.saturating_sub(1), x, (x + 1).min(width - 1)];
        let mut sum = [0.0f32; 3];

        for (ky, &py) in rows.iter().enumerate() {
            for (kx, &px) in cols.iter().enumerate() {
                let weight = kernel.weight(ky, kx);
                let idx = (py * width + px) * CHANNELS;
                for (c, acc) in sum.iter_mut().enumerate() {
                    *acc += src[idx + c] as f32 * weight;
                }
            }
        }

        let out = x * CHANNELS;
        for (c, acc) in sum.iter().enumerate() {
            row[out + c] = to_channel(*acc);
        }
        row[out + 3] = src[(y * width + x) * CHANNELS + 3];
    }
}

// Ties go to even, matching a Uint8ClampedArray store.
fn to_channel(sum: f32) -> u8 {
    sum.round_ties_even().clamp(0.0, 255.0) as u8
}
