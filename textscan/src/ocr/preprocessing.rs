use image::{DynamicImage, GenericImageView, GrayImage, ImageFormat, ImageReader, Luma};

use crate::config::OcrConfig;
use crate::error::{Result, TextScanError};

/// Normalise an uploaded image before it reaches Tesseract.
///
/// Rejects images smaller than `min_image_dimension` on either side, downscales
/// anything larger than `max_image_dimension` (aspect ratio kept), collapses to
/// 8-bit grayscale without alpha and stretches the histogram to the full range.
/// Output is PNG-encoded.
///
/// Block geometry stays valid because it is reported relative to the page.
pub fn preprocess_image(bytes: &[u8], config: &OcrConfig) -> Result<Vec<u8>> {
    let img = ImageReader::new(std::io::Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| TextScanError::Image(format!("Failed to read image: {e}")))?
        .decode()
        .map_err(|e| TextScanError::Image(format!("Failed to decode image: {e}")))?;

    let (width, height) = img.dimensions();
    let min = config.min_image_dimension;
    if width < min || height < min {
        return Err(TextScanError::Image(format!(
            "Image too small: {width}x{height}, minimum {min}x{min}"
        )));
    }

    let img = downscale(img, config.max_image_dimension);
    let gray = stretch_contrast(img.to_luma8());

    let mut output = Vec::new();
    DynamicImage::ImageLuma8(gray)
        .write_to(&mut std::io::Cursor::new(&mut output), ImageFormat::Png)
        .map_err(|e| TextScanError::Image(format!("Failed to encode image: {e}")))?;

    Ok(output)
}

fn downscale(img: DynamicImage, max_dim: u32) -> DynamicImage {
    let (width, height) = img.dimensions();
    if width <= max_dim && height <= max_dim {
        return img;
    }

    let ratio = max_dim as f32 / width.max(height) as f32;
    let new_width = ((width as f32 * ratio) as u32).max(1);
    let new_height = ((height as f32 * ratio) as u32).max(1);

    img.resize(new_width, new_height, image::imageops::FilterType::Lanczos3)
}

/// Linear histogram stretch: darkest pixel maps to 0, lightest to 255.
fn stretch_contrast(gray: GrayImage) -> GrayImage {
    let (lo, hi) = gray
        .pixels()
        .fold((u8::MAX, u8::MIN), |(lo, hi), p| (lo.min(p[0]), hi.max(p[0])));

    if hi <= lo {
        return gray;
    }

    let range = (hi - lo) as f32;
    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        let v = gray.get_pixel(x, y)[0];
        Luma([(((v - lo) as f32 / range) * 255.0).round() as u8])
    })
}
