// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Global binarization via Otsu's method, plus polarity normalization.
//
// Otsu picks the threshold that maximizes between-class variance of the
// intensity histogram. Which class lands on 255 is data-dependent at this
// stage; `normalize_polarity` pins ridges to foreground afterwards.

use image::{GrayImage, Luma};
use tracing::debug;

use dactyl_core::error::{DactylError, Result};

/// Compute the Otsu threshold for a grayscale raster.
///
/// Candidate thresholds are 1..=255, where threshold `t` puts pixels `< t`
/// in the background class and pixels `>= t` in the foreground class. Ties
/// are broken towards the lowest threshold. A single-intensity raster yields
/// the one present intensity; the empty-class guards mean no division by
/// zero on any input.
pub fn otsu_level(raster: &GrayImage) -> u8 {
    let mut histogram = [0u64; 256];
    for pixel in raster.pixels() {
        histogram[pixel.0[0] as usize] += 1;
    }

    let total_pixels = raster.width() as u64 * raster.height() as u64;
    if total_pixels == 0 {
        return 0;
    }

    let mut sum_total: f64 = 0.0;
    for (i, &count) in histogram.iter().enumerate() {
        sum_total += i as f64 * count as f64;
    }

    let mut sum_background: f64 = 0.0;
    let mut weight_background: u64 = 0;
    let mut max_variance: f64 = 0.0;
    let mut best_threshold: u8 = 0;

    for t in 1..=255usize {
        let below = histogram[t - 1];
        weight_background += below;
        sum_background += (t - 1) as f64 * below as f64;
        if weight_background == 0 {
            continue;
        }
        let weight_foreground = total_pixels - weight_background;
        if weight_foreground == 0 {
            break;
        }

        let mean_background = sum_background / weight_background as f64;
        let mean_foreground = (sum_total - sum_background) / weight_foreground as f64;

        let between_variance = weight_background as f64
            * weight_foreground as f64
            * (mean_background - mean_foreground).powi(2);

        if between_variance > max_variance {
            max_variance = between_variance;
            best_threshold = t as u8;
        }
    }

    if max_variance == 0.0 {
        // Single occupied bin: the only present intensity is the level.
        return histogram.iter().position(|&count| count > 0).unwrap_or(0) as u8;
    }
    best_threshold
}

/// Split the raster into a two-level {0, 255} raster at the Otsu threshold.
///
/// A raster whose histogram occupies a single bin has no second class to
/// separate and fails with `DegenerateImage`; the orchestrator absorbs this
/// and falls back to the original payload.
pub fn binarize(raster: &GrayImage) -> Result<GrayImage> {
    if raster.width() == 0 || raster.height() == 0 {
        return Err(DactylError::DegenerateImage(
            "zero-sized raster cannot be binarized".into(),
        ));
    }

    let first = raster.as_raw()[0];
    if raster.as_raw().iter().all(|&value| value == first) {
        return Err(DactylError::DegenerateImage(format!(
            "single-intensity raster (value {first}) has no class boundary"
        )));
    }

    let level = otsu_level(raster);
    debug!(level, "Otsu threshold computed");

    let (width, height) = raster.dimensions();
    let mut output = GrayImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let value = raster.get_pixel(x, y).0[0];
            let binary = if value < level { 0u8 } else { 255u8 };
            output.put_pixel(x, y, Luma([binary]));
        }
    }
    Ok(output)
}

/// Pin binary polarity to the ridge-foreground convention.
///
/// Otsu's class assignment follows the data, not ridge/valley semantics:
/// inked ridges are usually the dark class, so `invert` is the known-good
/// setting before skeletonization.
pub fn normalize_polarity(mut binary: GrayImage, invert: bool) -> GrayImage {
    if invert {
        for pixel in binary.pixels_mut() {
            pixel.0[0] = 255 - pixel.0[0];
        }
    }
    binary
}
