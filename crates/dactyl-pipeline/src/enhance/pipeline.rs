// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pipeline orchestrator — sequences decode, size bounding, adaptive
// equalization, binarization, polarity normalization, thinning, and
// re-encode for one payload.

use image::GrayImage;
use tracing::{debug, instrument, warn};

use dactyl_core::config::EnhanceConfig;
use dactyl_core::error::Result;
use dactyl_core::types::ContainerFormat;

use crate::codec;
use crate::enhance::{binarize, clahe, resize, skeleton};

/// Runs the ridge-skeleton enhancement pipeline over encoded payloads.
///
/// Enhancement is a best-effort convenience for reviewers: the samples it
/// reads are already safely stored, so any failure downgrades to handing
/// back the original payload rather than surfacing an error.
#[derive(Debug, Clone)]
pub struct FingerprintEnhancer {
    config: EnhanceConfig,
}

impl FingerprintEnhancer {
    pub fn new(config: EnhanceConfig) -> Self {
        Self { config }
    }

    /// Enhancer with the known-good reviewer configuration.
    pub fn with_defaults() -> Self {
        Self::new(EnhanceConfig::default())
    }

    pub fn config(&self) -> &EnhanceConfig {
        &self.config
    }

    /// Enhance one encoded payload, falling back to the original on any
    /// stage failure.
    ///
    /// All-or-nothing: a stage error never propagates and never yields a
    /// half-processed raster — the caller gets either the full skeleton or
    /// the untouched input.
    #[instrument(skip_all, fields(payload_len = payload.len()))]
    pub fn enhance_payload(&self, payload: &str) -> String {
        match self.try_enhance(payload) {
            Ok(enhanced) => enhanced,
            Err(err) => {
                warn!(error = %err, "enhancement failed; returning original payload");
                payload.to_string()
            }
        }
    }

    /// Run the full pipeline, propagating the first stage error.
    pub fn try_enhance(&self, payload: &str) -> Result<String> {
        let raster = codec::decode_payload(payload)?;
        let skeleton = self.enhance_raster(&raster)?;
        // Always re-encode as PNG: the skeleton is two-level line art, which
        // lossy containers would smear back into gray.
        codec::encode_gray(&skeleton, ContainerFormat::Png, None)
    }

    /// The raster-to-raster portion of the pipeline.
    pub fn enhance_raster(&self, raster: &GrayImage) -> Result<GrayImage> {
        let bounded = resize::bound_size(raster, self.config.max_dimension);
        let equalized = clahe::equalize_adaptive(&bounded, self.config.clip_limit, self.config.tile_grid);
        let binary = binarize::binarize(&equalized)?;
        let binary = binarize::normalize_polarity(binary, self.config.invert_polarity);
        let thinned = skeleton::skeletonize(&binary, self.config.thinning, self.config.max_thinning_passes);
        debug!(
            width = thinned.width(),
            height = thinned.height(),
            "pipeline complete"
        );
        Ok(thinned)
    }
}
