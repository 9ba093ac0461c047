// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the fingerprint enhancement pipeline. Uses a
// synthetic whorl (concentric rings) as a stand-in for ridge flow — it
// exercises every stage, including a non-trivial thinning workload.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{GrayImage, Luma};
use imageproc::drawing::draw_hollow_circle_mut;

use dactyl_core::types::ContainerFormat;
use dactyl_pipeline::FingerprintEnhancer;
use dactyl_pipeline::codec;

/// Draw a whorl-like pattern: light background, dark concentric rings.
fn synthetic_whorl(size: u32) -> GrayImage {
    let mut raster = GrayImage::from_pixel(size, size, Luma([210u8]));
    let centre = (size as i32 / 2, size as i32 / 2);
    let mut radius = 4i32;
    while radius < size as i32 / 2 {
        draw_hollow_circle_mut(&mut raster, centre, radius, Luma([55u8]));
        draw_hollow_circle_mut(&mut raster, centre, radius + 1, Luma([55u8]));
        radius += 6;
    }
    raster
}

/// Full payload-to-payload pipeline on a 256x256 whorl.
fn bench_enhance_payload(c: &mut Criterion) {
    let payload = codec::encode_gray(&synthetic_whorl(256), ContainerFormat::Png, None)
        .expect("bench fixture must encode");
    let enhancer = FingerprintEnhancer::with_defaults();

    c.bench_function("enhance_payload (256x256 whorl)", |b| {
        b.iter(|| {
            let enhanced = enhancer.enhance_payload(black_box(&payload));
            black_box(enhanced);
        });
    });
}

/// Raster-only pipeline (no codec) to isolate the numerical stages.
fn bench_enhance_raster(c: &mut Criterion) {
    let raster = synthetic_whorl(256);
    let enhancer = FingerprintEnhancer::with_defaults();

    c.bench_function("enhance_raster (256x256 whorl)", |b| {
        b.iter(|| {
            let skeleton = enhancer
                .enhance_raster(black_box(&raster))
                .expect("whorl is not degenerate");
            black_box(skeleton);
        });
    });
}

criterion_group!(benches, bench_enhance_payload, bench_enhance_raster);
criterion_main!(benches);
