// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Contrast-limited adaptive histogram equalization.
//
// The raster is partitioned into a grid of tiles; each tile gets its own
// clipped histogram-equalization transfer function, and every pixel is
// remapped by bilinearly interpolating between the transfer functions of
// the four nearest tiles. Clipping caps how much any single intensity can
// dominate a tile, which keeps sensor noise in flat regions from being
// amplified into false ridges.

use image::{GrayImage, Luma};
use tracing::debug;

/// Per-tile transfer function: intensity in, equalized intensity out.
type TileLut = [u8; 256];

/// Apply adaptive histogram equalization over a `rows × cols` tile grid.
///
/// `clip_limit` is a multiple of the mean histogram bin count per tile;
/// bins above `clip_limit × mean` are clipped and the excess redistributed
/// uniformly. Output dimensions equal input dimensions, and the result is
/// deterministic for a given `(clip_limit, tile_grid)`.
pub fn equalize_adaptive(
    raster: &GrayImage,
    clip_limit: f32,
    tile_grid: (u32, u32),
) -> GrayImage {
    let (width, height) = raster.dimensions();
    if width == 0 || height == 0 {
        return raster.clone();
    }

    // A grid finer than the raster itself would produce empty tiles.
    let rows = tile_grid.0.clamp(1, height) as usize;
    let cols = tile_grid.1.clamp(1, width) as usize;
    let tile_w = width as f32 / cols as f32;
    let tile_h = height as f32 / rows as f32;

    debug!(rows, cols, clip_limit, "computing tile transfer functions");

    let mut luts: Vec<TileLut> = Vec::with_capacity(rows * cols);
    for ty in 0..rows {
        let y0 = (ty as f32 * tile_h).round() as u32;
        let y1 = (((ty + 1) as f32) * tile_h).round().min(height as f32) as u32;
        for tx in 0..cols {
            let x0 = (tx as f32 * tile_w).round() as u32;
            let x1 = (((tx + 1) as f32) * tile_w).round().min(width as f32) as u32;
            luts.push(tile_lut(raster, x0, x1, y0, y1, clip_limit));
        }
    }

    let lut_index = |tx: usize, ty: usize| ty * cols + tx;

    GrayImage::from_fn(width, height, |x, y| {
        // Tile-centre coordinates: pixels between two tile centres blend
        // their transfer functions; pixels outside the outermost centres
        // use the border tile alone.
        let gx = (x as f32 + 0.5) / tile_w - 0.5;
        let gy = (y as f32 + 0.5) / tile_h - 0.5;

        let tx0 = (gx.floor().max(0.0) as usize).min(cols - 1);
        let ty0 = (gy.floor().max(0.0) as usize).min(rows - 1);
        let tx1 = (tx0 + 1).min(cols - 1);
        let ty1 = (ty0 + 1).min(rows - 1);
        let fx = (gx - tx0 as f32).clamp(0.0, 1.0);
        let fy = (gy - ty0 as f32).clamp(0.0, 1.0);

        let value = raster.get_pixel(x, y).0[0] as usize;
        let v00 = luts[lut_index(tx0, ty0)][value] as f32;
        let v01 = luts[lut_index(tx1, ty0)][value] as f32;
        let v10 = luts[lut_index(tx0, ty1)][value] as f32;
        let v11 = luts[lut_index(tx1, ty1)][value] as f32;

        let top = v00 * (1.0 - fx) + v01 * fx;
        let bottom = v10 * (1.0 - fx) + v11 * fx;
        Luma([(top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8])
    })
}

/// Build the clipped-equalization transfer function for one tile.
fn tile_lut(raster: &GrayImage, x0: u32, x1: u32, y0: u32, y1: u32, clip_limit: f32) -> TileLut {
    let mut histogram = [0u32; 256];
    let mut count = 0u32;
    for y in y0..y1 {
        for x in x0..x1 {
            histogram[raster.get_pixel(x, y).0[0] as usize] += 1;
            count += 1;
        }
    }

    let mut lut = [0u8; 256];
    if count == 0 {
        // Degenerate grid geometry; pass intensities through untouched.
        for (i, entry) in lut.iter_mut().enumerate() {
            *entry = i as u8;
        }
        return lut;
    }

    // Clip bins above clip_limit × mean bin count, then hand the excess
    // back uniformly across all bins.
    let threshold = ((clip_limit.max(1.0) * count as f32 / 256.0).max(1.0)) as u32;
    let mut excess = 0u32;
    for bin in histogram.iter_mut() {
        if *bin > threshold {
            excess += *bin - threshold;
            *bin = threshold;
        }
    }
    let increment = excess / 256;
    let remainder = (excess % 256) as usize;
    for (i, bin) in histogram.iter_mut().enumerate() {
        *bin += increment;
        if i < remainder {
            *bin += 1;
        }
    }

    let mut cumulative = 0u64;
    for (i, &bin) in histogram.iter().enumerate() {
        cumulative += bin as u64;
        lut[i] = ((cumulative as f32 / count as f32) * 255.0).round().min(255.0) as u8;
    }
    lut
}
