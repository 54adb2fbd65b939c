pub mod batch;
pub mod codec;
pub mod kernel;
pub mod pixel_buffer;
pub mod sharpen;

pub use batch::{BatchInput, BatchOutcome, SharpenOptions, SharpenedImage};
pub use codec::{OutputFormat, Quality};
pub use kernel::{Intensity, Kernel};
pub use pixel_buffer::PixelBuffer;
pub use sharpen::{SharpenConfig, sharpen};

pub type ImageSharpenResult<T> = Result<T, ImageSharpenError>;

#[derive(thiserror::Error, Debug)]
pub enum ImageSharpenError {
    #[error("Invalid input: buffer is {width}x{height}, both dimensions must be at least 1")]
    InvalidInput { width: u32, height: u32 },
    #[error("Buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSize { expected: usize, actual: usize },
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub trait Effect {
    fn apply(&self, source: &PixelBuffer) -> ImageSharpenResult<PixelBuffer>;
}
