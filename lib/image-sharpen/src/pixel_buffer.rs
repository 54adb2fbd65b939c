//! Owned RGBA8 pixel grid handed to the sharpening engine.

use crate::{ImageSharpenError, ImageSharpenResult};
use image::RgbaImage;

pub const CHANNELS: usize = 4;

/// Row-major RGBA buffer, channels interleaved as R, G, B, A.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA bytes. The length must be exactly `width * height * 4`.
    ///
    /// Zero-sized buffers are accepted here so callers can hand them on;
    /// the engine is the one that rejects them.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> ImageSharpenResult<Self> {
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(ImageSharpenError::BufferSize {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Caller guarantees `data.len() == width * height * 4`.
    pub(crate) fn from_parts(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize * CHANNELS);
        Self {
            width,
            height,
            data,
        }
    }

    /// A buffer where every pixel has the same value.
    pub fn filled(width: u32, height: u32, pixel: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            data.extend_from_slice(&pixel);
        }

        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Panics when `(x, y)` lies outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = self.index(x, y);
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, pixel: [u8; 4]) {
        let idx = self.index(x, y);
        self.data[idx..idx + CHANNELS].copy_from_slice(&pixel);
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn into_rgba_image(self) -> ImageSharpenResult<RgbaImage> {
        let expected = self.width as usize * self.height as usize * CHANNELS;
        let actual = self.data.len();
        RgbaImage::from_raw(self.width, self.height, self.data)
            .ok_or(ImageSharpenError::BufferSize { expected, actual })
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds for {}x{} buffer",
            self.width,
            self.height
        );
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }
}

impl From<RgbaImage> for PixelBuffer {
    fn from(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            data: image.into_raw(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_rejects_wrong_length() {
        let err = PixelBuffer::from_raw(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            ImageSharpenError::BufferSize {
                expected: 16,
                actual: 15
            }
        ));
    }

    #[test]
    fn test_from_raw_accepts_zero_sized() {
        let buf = PixelBuffer::from_raw(0, 5, Vec::new()).unwrap();
        assert!(buf.is_empty());
        assert_eq!(buf.dimensions(), (0, 5));
    }

    #[test]
    fn test_pixel_access_is_row_major() {
        let data = (0..24).collect::<Vec<u8>>();
        let buf = PixelBuffer::from_raw(3, 2, data).unwrap();

        assert_eq!(buf.pixel(0, 0), [0, 1, 2, 3]);
        assert_eq!(buf.pixel(2, 0), [8, 9, 10, 11]);
        assert_eq!(buf.pixel(0, 1), [12, 13, 14, 15]);
        assert_eq!(buf.pixel(2, 1), [20, 21, 22, 23]);
    }

    #[test]
    fn test_put_pixel() {
        let mut buf = PixelBuffer::filled(2, 2, [0, 0, 0, 255]);
        buf.put_pixel(1, 1, [9, 8, 7, 6]);

        assert_eq!(buf.pixel(1, 1), [9, 8, 7, 6]);
        assert_eq!(buf.pixel(0, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn test_rgba_image_conversion() {
        let mut img = RgbaImage::new(4, 3);
        img.put_pixel(3, 2, image::Rgba([10, 20, 30, 40]));

        let buf = PixelBuffer::from(img.clone());
        assert_eq!(buf.dimensions(), (4, 3));
        assert_eq!(buf.pixel(3, 2), [10, 20, 30, 40]);

        let back = buf.into_rgba_image().unwrap();
        assert_eq!(back, img);
    }

    #[test]
    #[should_panic]
    fn test_pixel_out_of_bounds_panics() {
        let buf = PixelBuffer::filled(1, 1, [0; 4]);
        buf.pixel(1, 0);
    }
}
