/// Sharpen effect example
/// Writes a soft gradient and its low/medium/high sharpened versions to tmp/

use image::{Rgba, RgbaImage};
use image_sharpen::{Effect, Intensity, PixelBuffer, SharpenConfig};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let mut img = RgbaImage::new(320, 240);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let ring = ((x as f32 - 160.0).hypot(y as f32 - 120.0) / 12.0).sin();
        let v = (127.0 + 60.0 * ring) as u8;
        *pixel = Rgba([v, (x * 255 / 320) as u8, (y * 255 / 240) as u8, 255]);
    }
    img.save(output_dir.join("sharpen_source.png"))?;

    let source = PixelBuffer::from(img);
    for intensity in Intensity::all() {
        let effect = SharpenConfig::new().with_intensity(*intensity);
        let sharpened = effect.apply(&source)?.into_rgba_image()?;

        let path = output_dir.join(format!("sharpen_{intensity}.png"));
        sharpened.save(&path)?;
        println!("✓ {intensity:<6} -> {}", path.display());
    }

    Ok(())
}
