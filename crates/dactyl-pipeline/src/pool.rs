// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bounded async worker pool for the enhancement pipeline.
//
// The pipeline is CPU-bound and synchronous; when embedded in a
// network-facing service it must not run on the thread serving the
// triggering request. Calls are pushed onto the blocking pool behind a
// semaphore, with a wall-clock budget per call.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::{instrument, warn};

use dactyl_core::config::PoolConfig;
use dactyl_core::types::FingerSampleSet;

use crate::enhance::pipeline::FingerprintEnhancer;

/// Semaphore-bounded wrapper around a [`FingerprintEnhancer`].
///
/// Timeout and worker loss degrade exactly like a stage failure: the caller
/// gets the original payload back. No pipeline state is shared between
/// calls, so any two calls may run concurrently.
#[derive(Clone)]
pub struct EnhancePool {
    enhancer: Arc<FingerprintEnhancer>,
    permits: Arc<Semaphore>,
    timeout: Duration,
}

impl EnhancePool {
    pub fn new(enhancer: FingerprintEnhancer, config: PoolConfig) -> Self {
        Self {
            enhancer: Arc::new(enhancer),
            permits: Arc::new(Semaphore::new(config.workers.max(1))),
            timeout: Duration::from_secs(config.timeout_secs.max(1)),
        }
    }

    /// Enhance one payload on the blocking pool.
    ///
    /// A call that exceeds the wall-clock budget returns the original
    /// payload; the worker itself is left to finish and release its permit,
    /// so an overrunning job still counts against the pool until it ends.
    #[instrument(skip_all, fields(payload_len = payload.len()))]
    pub async fn enhance_payload(&self, payload: String) -> String {
        let permit = match Arc::clone(&self.permits).acquire_owned().await {
            Ok(permit) => permit,
            Err(_closed) => return payload,
        };

        let enhancer = Arc::clone(&self.enhancer);
        let input = payload.clone();
        let work = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            enhancer.enhance_payload(&input)
        });

        match tokio::time::timeout(self.timeout, work).await {
            Ok(Ok(enhanced)) => enhanced,
            Ok(Err(join_error)) => {
                warn!(error = %join_error, "enhancement worker lost; returning original payload");
                payload
            }
            Err(_elapsed) => {
                warn!(budget = ?self.timeout, "enhancement timed out; returning original payload");
                payload
            }
        }
    }

    /// Enhance a whole sample set, one worker slot per sample.
    pub async fn enhance_set(&self, samples: FingerSampleSet) -> FingerSampleSet {
        let mut enhanced = FingerSampleSet::new();
        for (finger, sample) in samples {
            let payload = self.enhance_payload(sample.payload().to_string()).await;
            enhanced.insert(finger, sample.with_payload(payload));
        }
        enhanced
    }
}
