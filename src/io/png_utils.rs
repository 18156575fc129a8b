// Copyright @yucwang 2026

use crate::math::bitmap::Bitmap;
use crate::math::colorimetry::linear_to_srgb_u8;

// Write the developed image as 8-bit sRGB PNG for quick viewing. The
// sRGB transfer function and the display clamp happen only here; the
// bitmap itself stays linear.
pub fn write_png_to_file(image: &Bitmap, file_path: &str) {
    log::info!("Starting writing png image: {}.", file_path);

    let width = image.width();
    let height = image.height();
    let encoded = image::RgbImage::from_fn(width as u32, height as u32, |x, y| {
        let pixel = image[(x as usize, y as usize)];
        image::Rgb([
            linear_to_srgb_u8(pixel[0]),
            linear_to_srgb_u8(pixel[1]),
            linear_to_srgb_u8(pixel[2]),
        ])
    });

    match encoded.save(file_path) {
        Ok(()) => log::info!("PNG written to: {}.", file_path),
        Err(e) => log::error!("PNG written error: {}.", e.to_string()),
    }
}
