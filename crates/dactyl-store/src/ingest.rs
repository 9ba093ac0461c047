// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sample ingestion — decodes embedded-form capture payloads and writes them
// to uniquely named files under a per-enrollment directory.

use std::fs;
use std::path::PathBuf;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use dactyl_core::config::StoreConfig;
use dactyl_core::error::{DactylError, Result};
use dactyl_core::types::{
    ContainerFormat, DataUri, EnrollmentId, FingerSampleSet, StoredRef, StoredSample,
    StoredSampleRef,
};

/// Subdirectory of the media root that holds all fingerprint samples.
const SAMPLE_DIR: &str = "fingerprints";

/// Writes captured fingerprint samples to stable storage locations.
///
/// Stored files are never mutated in place: every write gets a fresh unique
/// suffix, so re-ingesting the same enrollment produces new files rather
/// than overwriting old ones, and two concurrent writers cannot collide.
/// Stale files from prior captures accumulate unless collected externally.
pub struct SampleStore {
    media_root: PathBuf,
}

impl SampleStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            media_root: config.media_root,
        }
    }

    /// Persist every embedded-form sample in the set and return the per-finger
    /// storage references.
    ///
    /// Samples not in embedded form are assumed to already be stored elsewhere
    /// and pass through as opaque references. A payload whose declared
    /// container subtype is absent or unrecognized is rejected rather than
    /// written with a guessed extension.
    #[instrument(skip(self, samples), fields(enrollment = %enrollment, sample_count = samples.len()))]
    pub fn ingest(
        &self,
        samples: &FingerSampleSet,
        enrollment: &EnrollmentId,
    ) -> Result<StoredSampleRef> {
        let folder = self
            .media_root
            .join(SAMPLE_DIR)
            .join(enrollment.as_str());
        // Safe to repeat for the same enrollment.
        fs::create_dir_all(&folder)?;

        let mut stored = StoredSampleRef::new();
        for (finger, sample) in samples {
            let payload = sample.payload();
            let Some(uri) = DataUri::parse(payload) else {
                debug!(finger, "payload not in embedded form; passing through");
                stored.insert(finger.clone(), StoredRef::Passthrough(payload.to_string()));
                continue;
            };

            let subtype = uri.subtype().ok_or_else(|| {
                DactylError::UnsupportedFormat(format!(
                    "payload for {finger} declares no container subtype: {}",
                    uri.mime()
                ))
            })?;
            let format = ContainerFormat::from_subtype(subtype).ok_or_else(|| {
                DactylError::UnsupportedFormat(format!(
                    "payload for {finger} declares unrecognized subtype: {subtype}"
                ))
            })?;

            let bytes = BASE64.decode(uri.data().trim()).map_err(|err| {
                DactylError::Decode(format!("payload for {finger} is not valid base64: {err}"))
            })?;

            let filename = format!(
                "{finger}_{}.{}",
                Uuid::new_v4().simple(),
                format.extension()
            );
            fs::write(folder.join(&filename), &bytes)?;

            let relative_path = format!("{SAMPLE_DIR}/{enrollment}/{filename}");
            debug!(finger, path = %relative_path, bytes = bytes.len(), "sample written");
            stored.insert(
                finger.clone(),
                StoredRef::Saved(StoredSample {
                    relative_path,
                    format,
                    stored_at: Utc::now(),
                }),
            );
        }

        info!(stored = stored.len(), "sample set ingested");
        Ok(stored)
    }
}
