/* Copyright 2020 @TwoCookingMice */

use crate::math::bitmap::Bitmap;

use exr::prelude::*;

// Write the developed image as linear-radiance OpenEXR.
pub fn write_exr_to_file(image: &Bitmap, file_path: &str) {
    log::info!("Starting writing openexr images: {}.", file_path);

    let raw = image.raw_copy();
    let width = image.width();
    let write_result = write_rgb_file(file_path, width, image.height(), |x, y| {
        (
            raw[y * width + x].0,
            raw[y * width + x].1,
            raw[y * width + x].2,
        )
    });
    match write_result {
        Ok(()) => log::info!("EXR written to: {}.", file_path),
        Err(e) => log::error!("EXR written error: {}.", e.to_string())
    }
}
