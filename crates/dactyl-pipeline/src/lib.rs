// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// dactyl-pipeline — Fingerprint image enhancement for the Dactyl engine.
//
// Provides the payload codec (embedded-form parsing, base64 transport,
// raster decode/encode), the enhancement pipeline (size bounding, adaptive
// histogram equalization, Otsu binarization, polarity normalization,
// morphological thinning), the sample-set processor, and a bounded async
// worker pool for running the CPU-bound pipeline off request threads.

pub mod codec;
pub mod enhance;
pub mod pool;
pub mod set;

// Re-export the primary entry points so callers can use
// `dactyl_pipeline::FingerprintEnhancer` etc.
pub use enhance::pipeline::FingerprintEnhancer;
pub use pool::EnhancePool;
