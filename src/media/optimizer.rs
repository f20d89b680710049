use std::io::Cursor;

use image::{
    codecs::jpeg::JpegEncoder,
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    codecs::webp::WebPEncoder,
    imageops::FilterType,
};

/// Largest edge of a stored photo after optimization.
pub const MAX_DIMENSION: u32 = 500;

/// JPEG re-encode quality.
pub const JPEG_QUALITY: u8 = 85;

/// Square-crop, downscale and re-encode an uploaded photo.
///
/// The image is center-cropped to the smaller of its dimensions, resized
/// down to at most 500x500 with Lanczos3, converted to RGB and re-encoded
/// according to the stored extension (JPEG at quality 85, PNG at best
/// compression, WebP lossless). Errors are the caller's problem to treat
/// as non-fatal.
pub fn optimize(bytes: &[u8], ext: &str) -> Result<Vec<u8>, image::ImageError> {
    let img = image::load_from_memory(bytes)?;

    let (width, height) = (img.width(), img.height());
    let side = width.min(height);
    let cropped = img.crop_imm((width - side) / 2, (height - side) / 2, side, side);

    let resized = if side > MAX_DIMENSION {
        cropped.resize(MAX_DIMENSION, MAX_DIMENSION, FilterType::Lanczos3)
    } else {
        cropped
    };

    let rgb = resized.to_rgb8();
    let mut out = Cursor::new(Vec::new());

    match ext {
        "png" => {
            let encoder = PngEncoder::new_with_quality(
                &mut out,
                CompressionType::Best,
                PngFilterType::Adaptive,
            );
            rgb.write_with_encoder(encoder)?;
        }
        "webp" => {
            let encoder = WebPEncoder::new_lossless(&mut out);
            rgb.write_with_encoder(encoder)?;
        }
        _ => {
            let encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
            rgb.write_with_encoder(encoder)?;
        }
    }

    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbaImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width,
            height,
            image::Rgba([200, 120, 40, 255]),
        ));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn landscape_is_cropped_square_and_downscaled() {
        let optimized = optimize(&png_bytes(800, 600), "png").unwrap();
        let result = image::load_from_memory(&optimized).unwrap();
        assert_eq!((result.width(), result.height()), (500, 500));
    }

    #[test]
    fn small_image_is_not_upscaled() {
        let optimized = optimize(&png_bytes(200, 300), "jpg").unwrap();
        let result = image::load_from_memory(&optimized).unwrap();
        assert_eq!((result.width(), result.height()), (200, 200));
    }

    #[test]
    fn garbage_bytes_error() {
        assert!(optimize(b"not an image at all", "jpg").is_err());
    }
}
