// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Morphological thinning — reduces binary ridge blobs to one-pixel-wide
// skeletons while preserving connectivity and ridge endpoints.
//
// Both rule sets work on the 3×3 neighbourhood, numbered clockwise from
// north (Zhang-Suen convention):
//
//     p9 p2 p3
//     p8  . p4
//     p7 p6 p5
//
// Each pass runs two sub-iterations; a pixel is removed only when the rule
// set proves its removal cannot break connectivity or shorten an endpoint.
// The pass bound guards against pathological binary patterns that would
// otherwise iterate far longer than any real scan.

use image::{GrayImage, Luma};
use tracing::debug;

use dactyl_core::types::ThinningAlgorithm;

/// Thin foreground (255) blobs down to one-pixel-wide skeletons.
///
/// Pixels `>= 128` count as foreground. Iterates until a full pass removes
/// nothing, or `max_passes` is reached. Already-minimal strokes (single
/// pixels, 1-pixel lines) are fixpoints.
pub fn skeletonize(binary: &GrayImage, algorithm: ThinningAlgorithm, max_passes: u32) -> GrayImage {
    let (width, height) = binary.dimensions();
    let w = width as usize;
    let h = height as usize;

    let mut grid: Vec<bool> = binary.as_raw().iter().map(|&value| value >= 128).collect();
    let mut to_clear: Vec<usize> = Vec::new();
    let mut passes = 0u32;

    while passes < max_passes {
        let mut changed = false;
        for sub in 0..2 {
            to_clear.clear();
            for y in 0..h {
                for x in 0..w {
                    if !grid[y * w + x] {
                        continue;
                    }
                    let p = neighbours(&grid, w, h, x, y);
                    let remove = match algorithm {
                        ThinningAlgorithm::GuoHall => guo_hall_removable(p, sub),
                        ThinningAlgorithm::ZhangSuen => zhang_suen_removable(p, sub),
                    };
                    if remove {
                        to_clear.push(y * w + x);
                    }
                }
            }
            if !to_clear.is_empty() {
                changed = true;
                for &index in &to_clear {
                    grid[index] = false;
                }
            }
        }
        passes += 1;
        if !changed {
            break;
        }
    }

    debug!(passes, "thinning converged");
    GrayImage::from_fn(width, height, |x, y| {
        Luma([if grid[y as usize * w + x as usize] { 255u8 } else { 0u8 }])
    })
}

/// Neighbourhood [p2, p3, p4, p5, p6, p7, p8, p9]; out-of-bounds is background.
fn neighbours(grid: &[bool], w: usize, h: usize, x: usize, y: usize) -> [bool; 8] {
    let at = |dx: isize, dy: isize| -> bool {
        let nx = x as isize + dx;
        let ny = y as isize + dy;
        nx >= 0 && ny >= 0 && (nx as usize) < w && (ny as usize) < h
            && grid[ny as usize * w + nx as usize]
    };
    [
        at(0, -1),  // p2 N
        at(1, -1),  // p3 NE
        at(1, 0),   // p4 E
        at(1, 1),   // p5 SE
        at(0, 1),   // p6 S
        at(-1, 1),  // p7 SW
        at(-1, 0),  // p8 W
        at(-1, -1), // p9 NW
    ]
}

/// Guo-Hall deletion test for one sub-iteration.
fn guo_hall_removable(p: [bool; 8], sub: usize) -> bool {
    let [p2, p3, p4, p5, p6, p7, p8, p9] = p;

    let c = (!p2 && (p3 || p4)) as u32
        + (!p4 && (p5 || p6)) as u32
        + (!p6 && (p7 || p8)) as u32
        + (!p8 && (p9 || p2)) as u32;

    let n1 = (p9 || p2) as u32 + (p3 || p4) as u32 + (p5 || p6) as u32 + (p7 || p8) as u32;
    let n2 = (p2 || p3) as u32 + (p4 || p5) as u32 + (p6 || p7) as u32 + (p8 || p9) as u32;
    let n = n1.min(n2);

    let m = if sub == 0 {
        (p6 || p7 || !p9) && p8
    } else {
        (p2 || p3 || !p5) && p4
    };

    c == 1 && (2..=3).contains(&n) && !m
}

/// Zhang-Suen deletion test for one sub-iteration.
fn zhang_suen_removable(p: [bool; 8], sub: usize) -> bool {
    let [p2, p3, p4, p5, p6, p7, p8, p9] = p;

    // B: foreground neighbours; A: 0→1 transitions around the ring.
    let b = p.iter().filter(|&&v| v).count();
    let ring = [p2, p3, p4, p5, p6, p7, p8, p9, p2];
    let a = ring.windows(2).filter(|w| !w[0] && w[1]).count();

    let structural = if sub == 0 {
        !(p2 && p4 && p6) && !(p4 && p6 && p8)
    } else {
        !(p2 && p4 && p8) && !(p2 && p6 && p8)
    };

    (2..=6).contains(&b) && a == 1 && structural
}
