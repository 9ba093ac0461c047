// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Engine configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::types::ThinningAlgorithm;

/// Tuning for the enhancement pipeline.
///
/// Defaults reproduce the known-good reviewer configuration: 500 px bound,
/// clip limit 3.0 over an 8×8 tile grid, ridge-foreground polarity, Guo-Hall
/// thinning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhanceConfig {
    /// Largest allowed raster dimension before the pipeline runs; bigger
    /// inputs are downscaled proportionally.
    pub max_dimension: u32,
    /// Histogram clip limit, as a multiple of the mean bin count per tile.
    pub clip_limit: f32,
    /// Adaptive equalization tile grid (rows, cols).
    pub tile_grid: (u32, u32),
    /// Flip binary polarity so ridges come out as foreground (255).
    pub invert_polarity: bool,
    /// Neighbourhood rule set for skeletonization.
    pub thinning: ThinningAlgorithm,
    /// Upper bound on thinning passes; pathological binary patterns can
    /// otherwise iterate far longer than typical scans.
    pub max_thinning_passes: u32,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            max_dimension: 500,
            clip_limit: 3.0,
            tile_grid: (8, 8),
            invert_polarity: true,
            thinning: ThinningAlgorithm::GuoHall,
            max_thinning_passes: 256,
        }
    }
}

/// Sizing for the bounded enhancement worker pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Maximum pipelines running concurrently.
    pub workers: usize,
    /// Per-call wall-clock budget in seconds; an overrunning call degrades
    /// to returning the original payload.
    pub timeout_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            timeout_secs: 10,
        }
    }
}

/// Where ingestion writes decoded samples.
///
/// The media root is explicit configuration — nothing in the engine reads
/// ambient process-wide state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub media_root: PathBuf,
}

impl StoreConfig {
    pub fn new(media_root: impl Into<PathBuf>) -> Self {
        Self {
            media_root: media_root.into(),
        }
    }
}
