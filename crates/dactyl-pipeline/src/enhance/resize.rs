// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Size bounding — caps the raster's largest dimension to keep the later
// CPU-bound stages cheap.

use image::GrayImage;
use image::imageops::{self, FilterType};
use tracing::debug;

/// Bound the raster's largest dimension to `max_dimension` pixels.
///
/// Rasters already within bounds are returned unchanged. Larger ones are
/// downscaled proportionally with bilinear resampling, rounding each axis to
/// the nearest integer pixel count, so the aspect ratio survives.
pub fn bound_size(raster: &GrayImage, max_dimension: u32) -> GrayImage {
    let (width, height) = raster.dimensions();
    let largest = width.max(height);
    if largest <= max_dimension {
        return raster.clone();
    }

    let scale = max_dimension as f32 / largest as f32;
    let new_width = ((width as f32 * scale).round() as u32).max(1);
    let new_height = ((height as f32 * scale).round() as u32).max(1);

    debug!(
        from_w = width,
        from_h = height,
        new_width,
        new_height,
        "bounding raster size"
    );
    imageops::resize(raster, new_width, new_height, FilterType::Triangle)
}
