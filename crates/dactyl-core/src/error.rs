// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Dactyl.

use thiserror::Error;

/// Top-level error type for all Dactyl operations.
#[derive(Debug, Error)]
pub enum DactylError {
    // -- Payload / codec errors --
    #[error("payload is not valid image data: {0}")]
    Decode(String),

    #[error("unrecognized container format: {0}")]
    UnsupportedFormat(String),

    // -- Pipeline errors --
    #[error("degenerate image: {0}")]
    DegenerateImage(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DactylError>;
