// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Enhancement pipeline stages — size bounding, adaptive histogram
// equalization, Otsu binarization, polarity normalization, morphological
// thinning — and the orchestrator that sequences them.

pub mod binarize;
pub mod clahe;
pub mod pipeline;
pub mod resize;
pub mod skeleton;

pub use pipeline::FingerprintEnhancer;
