use image::{DynamicImage, GrayImage, Rgb, RgbImage, RgbaImage};
use ndarray::ArrayD;

use crate::error::SampleError;

/// Scale a unit-range value to a byte, clamping out-of-range input (NaN maps to 0).
pub fn to_u8(value: f32) -> u8 {
    (value * 255.0).clamp(0.0, 255.0) as u8
}

/// Convert one sample (HxW, HxWx1, HxWx3 or HxWx4, values in [0, 1]) to an 8-bit image.
pub fn to_image(sample: &ArrayD<f32>) -> Result<DynamicImage, SampleError> {
    let unsupported = || SampleError::UnsupportedShape {
        shape: sample.shape().to_vec(),
    };

    let (height, width, channels) = match *sample.shape() {
        [h, w] => (h, w, 1),
        [h, w, c @ (1 | 3 | 4)] => (h, w, c),
        _ => return Err(unsupported()),
    };
    if height == 0 || width == 0 {
        return Err(unsupported());
    }
    let width = u32::try_from(width).map_err(|_| unsupported())?;
    let height = u32::try_from(height).map_err(|_| unsupported())?;

    // Logical iteration order is row-major, matching the interleaved layout `image` expects.
    let encoded: Vec<u8> = sample.iter().map(|&value| to_u8(value)).collect();

    let image = match channels {
        1 => GrayImage::from_raw(width, height, encoded).map(DynamicImage::ImageLuma8),
        3 => RgbImage::from_raw(width, height, encoded).map(DynamicImage::ImageRgb8),
        _ => RgbaImage::from_raw(width, height, encoded).map(DynamicImage::ImageRgba8),
    };
    image.ok_or_else(unsupported)
}

/// Convert a sample to RGB for display, compositing any alpha over white.
pub fn to_display_rgb(sample: &ArrayD<f32>) -> Result<RgbImage, SampleError> {
    match to_image(sample)? {
        DynamicImage::ImageRgba8(rgba) => {
            let mut rgb = RgbImage::new(rgba.width(), rgba.height());
            for (x, y, pixel) in rgba.enumerate_pixels() {
                let [r, g, b, a] = pixel.0;
                let alpha = f32::from(a) / 255.0;
                let blend = |channel: u8| {
                    (f32::from(channel) * alpha + 255.0 * (1.0 - alpha)).round() as u8
                };
                rgb.put_pixel(x, y, Rgb([blend(r), blend(g), blend(b)]));
            }
            Ok(rgb)
        }
        other => Ok(other.to_rgb8()),
    }
}
