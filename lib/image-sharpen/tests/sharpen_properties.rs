use image_sharpen::{Effect, ImageSharpenError, Intensity, PixelBuffer, SharpenConfig, sharpen};

// Small deterministic generator so the buffers are reproducible.
fn noise_buffer(width: u32, height: u32, seed: u32) -> PixelBuffer {
    let mut state = seed;
    let data = (0..width * height * 4)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 24) as u8
        })
        .collect::<Vec<u8>>();
    PixelBuffer::from_raw(width, height, data).unwrap()
}

fn reference_sharpen(source: &PixelBuffer, intensity: Intensity) -> PixelBuffer {
    let (width, height) = source.dimensions();
    let kernel = intensity.kernel();
    let mut out = source.clone();

    for y in 0..height as i64 {
        for x in 0..width as i64 {
            let mut sum = [0.0f64; 3];
            for ky in 0..3i64 {
                for kx in 0..3i64 {
                    let py = (y + ky - 1).clamp(0, height as i64 - 1) as u32;
                    let px = (x + kx - 1).clamp(0, width as i64 - 1) as u32;
                    let pixel = source.pixel(px, py);
                    let weight = kernel.weight(ky as usize, kx as usize) as f64;
                    for c in 0..3 {
                        sum[c] += pixel[c] as f64 * weight;
                    }
                }
            }

            let alpha = source.pixel(x as u32, y as u32)[3];
            let channel = |v: f64| v.round_ties_even().clamp(0.0, 255.0) as u8;
            out.put_pixel(
                x as u32,
                y as u32,
                [channel(sum[0]), channel(sum[1]), channel(sum[2]), alpha],
            );
        }
    }

    out
}

const SIZES: [(u32, u32); 6] = [(1, 1), (1, 7), (7, 1), (2, 2), (16, 9), (33, 20)];

#[test]
fn test_matches_sequential_reference() {
    for (i, &(width, height)) in SIZES.iter().enumerate() {
        let source = noise_buffer(width, height, i as u32 + 1);
        for &intensity in Intensity::all() {
            let out = sharpen(&source, intensity).unwrap();
            assert_eq!(
                out,
                reference_sharpen(&source, intensity),
                "{width}x{height} {intensity}"
            );
        }
    }
}

#[test]
fn test_dimensions_and_alpha_preserved() {
    for (i, &(width, height)) in SIZES.iter().enumerate() {
        let source = noise_buffer(width, height, 100 + i as u32);
        for &intensity in Intensity::all() {
            let out = sharpen(&source, intensity).unwrap();
            assert_eq!(out.dimensions(), source.dimensions());

            let alpha_in = source.as_raw().chunks_exact(4).map(|p| p[3]);
            let alpha_out = out.as_raw().chunks_exact(4).map(|p| p[3]);
            assert!(alpha_in.eq(alpha_out), "{width}x{height} {intensity}");
        }
    }
}

#[test]
fn test_deterministic_and_input_untouched() {
    let source = noise_buffer(40, 25, 7);
    let snapshot = source.clone();

    for &intensity in Intensity::all() {
        let first = sharpen(&source, intensity).unwrap();
        let second = sharpen(&source, intensity).unwrap();
        assert_eq!(first.as_raw(), second.as_raw());
    }
    assert_eq!(source, snapshot);
}

#[test]
fn test_flat_fields_survive_every_intensity() {
    let source = PixelBuffer::filled(6, 5, [100, 100, 100, 255]);
    for &intensity in Intensity::all() {
        assert_eq!(sharpen(&source, intensity).unwrap(), source);
    }
}

#[test]
fn test_zero_sized_rejected_through_effect() {
    let empty = PixelBuffer::from_raw(0, 0, Vec::new()).unwrap();
    let err = SharpenConfig::new()
        .with_intensity(Intensity::High)
        .apply(&empty)
        .unwrap_err();
    assert!(matches!(
        err,
        ImageSharpenError::InvalidInput {
            width: 0,
            height: 0
        }
    ));
}

#[test]
fn test_rgba_image_round_trip() -> anyhow::Result<()> {
    let mut img = image::RgbaImage::new(3, 3);
    img.put_pixel(1, 1, image::Rgba([255, 255, 255, 128]));

    let out = sharpen(&PixelBuffer::from(img), Intensity::High)?.into_rgba_image()?;

    assert_eq!(out.get_pixel(1, 1).0, [255, 255, 255, 128]);
    assert_eq!(out.get_pixel(0, 0).0, [0, 0, 0, 0]);
    Ok(())
}
