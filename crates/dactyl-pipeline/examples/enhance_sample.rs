// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Demo: build a synthetic capture set, run the enhancement pipeline over it,
// and report what came back. Run with `cargo run --example enhance_sample`.

use image::{GrayImage, Luma};
use imageproc::drawing::draw_hollow_circle_mut;

use dactyl_core::types::{ContainerFormat, FingerSample, FingerSampleSet};
use dactyl_pipeline::FingerprintEnhancer;
use dactyl_pipeline::codec;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Dactyl enhancement demo starting");

    // A whorl-like synthetic capture and one deliberately broken payload.
    let mut raster = GrayImage::from_pixel(320, 320, Luma([210u8]));
    let mut radius = 5i32;
    while radius < 150 {
        draw_hollow_circle_mut(&mut raster, (160, 160), radius, Luma([55u8]));
        radius += 7;
    }
    let payload = codec::encode_gray(&raster, ContainerFormat::Png, None)
        .expect("synthetic capture must encode");

    let mut samples = FingerSampleSet::new();
    samples.insert(
        "right_thumb".into(),
        FingerSample::Plain(format!("data:image/png;base64,{payload}")),
    );
    samples.insert(
        "right_index".into(),
        FingerSample::Plain("garbled-capture-data".into()),
    );

    let enhancer = FingerprintEnhancer::with_defaults();
    let enhanced = enhancer.enhance_set(&samples);

    for (finger, sample) in &enhanced {
        let changed = sample.payload() != samples[finger].payload();
        println!(
            "{finger}: {} ({} chars)",
            if changed { "enhanced" } else { "returned unchanged" },
            sample.payload().len()
        );
    }
}
