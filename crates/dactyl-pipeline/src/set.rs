// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sample-set processing — applies the enhancement pipeline across a named
// collection of fingerprint samples, one per finger.

use tracing::{info, instrument};

use dactyl_core::error::Result;
use dactyl_core::types::FingerSampleSet;

use crate::enhance::pipeline::FingerprintEnhancer;

impl FingerprintEnhancer {
    /// Enhance every sample in a set, preserving its exact key set and each
    /// entry's structural shape.
    ///
    /// Bare payloads are enhanced in place; metadata-wrapped records get the
    /// payload field replaced and every other field copied verbatim. Failures
    /// are isolated per finger — a sample the pipeline cannot process comes
    /// back unchanged without affecting its neighbours.
    #[instrument(skip_all, fields(sample_count = samples.len()))]
    pub fn enhance_set(&self, samples: &FingerSampleSet) -> FingerSampleSet {
        let enhanced = samples
            .iter()
            .map(|(finger, sample)| {
                let payload = self.enhance_payload(sample.payload());
                (finger.clone(), sample.with_payload(payload))
            })
            .collect();
        info!("sample set enhanced");
        enhanced
    }
}

/// Parse the JSON form of a sample set, as submitted on the enrollment form.
///
/// Capture clients send the per-finger map serialized into a single string
/// field; an empty or blank field means "no samples".
pub fn parse_set(raw: &str) -> Result<FingerSampleSet> {
    if raw.trim().is_empty() {
        return Ok(FingerSampleSet::new());
    }
    Ok(serde_json::from_str(raw)?)
}

/// Serialize a sample set back into its wire form.
pub fn set_to_string(samples: &FingerSampleSet) -> Result<String> {
    Ok(serde_json::to_string(samples)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;
    use dactyl_core::types::{ContainerFormat, FingerSample};
    use image::{GrayImage, Luma};

    fn striped_payload() -> String {
        let raster = GrayImage::from_fn(64, 64, |x, _| Luma([if (x / 3) % 2 == 0 { 40u8 } else { 210u8 }]));
        codec::encode_gray(&raster, ContainerFormat::Png, None).unwrap()
    }

    fn sample_set() -> FingerSampleSet {
        let mut samples = FingerSampleSet::new();
        samples.insert("left_thumb".into(), FingerSample::Plain(striped_payload()));
        samples.insert(
            "right_index".into(),
            serde_json::from_value(serde_json::json!({
                "image": striped_payload(),
                "device": "scanner-7",
                "quality": 0.87,
            }))
            .unwrap(),
        );
        samples.insert("right_thumb".into(), FingerSample::Plain("not an image".into()));
        samples
    }

    #[test]
    fn key_set_is_preserved_exactly() {
        let enhancer = FingerprintEnhancer::with_defaults();
        let input = sample_set();
        let output = enhancer.enhance_set(&input);
        let input_keys: Vec<_> = input.keys().collect();
        let output_keys: Vec<_> = output.keys().collect();
        assert_eq!(input_keys, output_keys);
    }

    #[test]
    fn metadata_fields_survive_verbatim() {
        let enhancer = FingerprintEnhancer::with_defaults();
        let output = enhancer.enhance_set(&sample_set());
        match &output["right_index"] {
            FingerSample::Annotated { image, metadata } => {
                assert!(codec::decode_payload(image).is_ok());
                assert_eq!(metadata["device"], "scanner-7");
                assert_eq!(metadata["quality"], 0.87);
            }
            FingerSample::Plain(_) => panic!("annotated shape must be preserved"),
        }
    }

    #[test]
    fn failures_are_isolated_per_finger() {
        let enhancer = FingerprintEnhancer::with_defaults();
        let input = sample_set();
        let output = enhancer.enhance_set(&input);

        // The unreadable sample comes back unchanged...
        assert_eq!(output["right_thumb"], input["right_thumb"]);
        // ...while its neighbours are still enhanced.
        assert_ne!(output["left_thumb"], input["left_thumb"]);
        assert!(codec::decode_payload(output["left_thumb"].payload()).is_ok());
    }

    /// A blank white capture decodes fine but has zero histogram variance;
    /// the entry must come back unchanged instead of erroring out.
    #[test]
    fn blank_capture_entry_returns_original_payload() {
        let blank = GrayImage::from_pixel(100, 100, Luma([255u8]));
        let payload = format!(
            "data:image/png;base64,{}",
            codec::encode_gray(&blank, ContainerFormat::Png, None).unwrap()
        );
        let mut samples = FingerSampleSet::new();
        samples.insert("right_thumb".into(), FingerSample::Plain(payload.clone()));

        let enhancer = FingerprintEnhancer::with_defaults();
        let output = enhancer.enhance_set(&samples);

        assert_eq!(output.len(), 1);
        assert_eq!(output["right_thumb"].payload(), payload);
        assert!(codec::decode_payload(output["right_thumb"].payload()).is_ok());
    }

    #[test]
    fn wire_form_round_trips() {
        let raw = r#"{"left_thumb": "abc", "right_index": {"image": "def", "device": "d2"}}"#;
        let parsed = parse_set(raw).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed["left_thumb"].payload(), "abc");
        assert_eq!(parsed["right_index"].payload(), "def");

        let serialized = set_to_string(&parsed).unwrap();
        let reparsed = parse_set(&serialized).unwrap();
        assert_eq!(parsed, reparsed);
    }

    #[test]
    fn blank_wire_form_is_empty_set() {
        assert!(parse_set("").unwrap().is_empty());
        assert!(parse_set("   ").unwrap().is_empty());
    }

    #[test]
    fn malformed_wire_form_is_an_error() {
        assert!(parse_set("{not json").is_err());
    }
}
