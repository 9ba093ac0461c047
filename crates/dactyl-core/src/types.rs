// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Dactyl fingerprint sample engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier of the enrollment record a sample set belongs to.
///
/// Opaque to this engine — the caller's record layer owns its meaning. It only
/// ever appears as a path segment of stored sample locations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnrollmentId(pub String);

impl EnrollmentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EnrollmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raster container formats accepted in embedded-form payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContainerFormat {
    Png,
    Jpeg,
    Bmp,
    Webp,
    Tiff,
}

impl ContainerFormat {
    /// MIME type string as declared in an embedded-form marker.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Bmp => "image/bmp",
            Self::Webp => "image/webp",
            Self::Tiff => "image/tiff",
        }
    }

    /// File extension used when a decoded sample is written to disk.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Bmp => "bmp",
            Self::Webp => "webp",
            Self::Tiff => "tiff",
        }
    }

    /// Resolve a declared MIME subtype (the part after `image/`).
    pub fn from_subtype(subtype: &str) -> Option<Self> {
        match subtype.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "bmp" => Some(Self::Bmp),
            "webp" => Some(Self::Webp),
            "tif" | "tiff" => Some(Self::Tiff),
            _ => None,
        }
    }

    /// Whether encoding in this container discards information.
    pub fn is_lossy(&self) -> bool {
        matches!(self, Self::Jpeg)
    }
}

/// Borrowed view of an embedded-form payload: `[data:]<mime>;base64,<data>`.
///
/// Capture clients send either this self-describing form or a bare base64
/// string (legacy form). `parse` returns `None` for the latter — the caller
/// treats the whole payload as transport-encoded data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataUri<'a> {
    mime: &'a str,
    data: &'a str,
}

impl<'a> DataUri<'a> {
    /// Split an embedded-form payload into its marker and data segments.
    pub fn parse(payload: &'a str) -> Option<Self> {
        let trimmed = payload.strip_prefix("data:").unwrap_or(payload);
        let (mime, data) = trimmed.split_once(";base64,")?;
        if mime.is_empty() || mime.contains(char::is_whitespace) {
            return None;
        }
        Some(Self { mime, data })
    }

    /// The declared MIME type, e.g. `image/png`.
    pub fn mime(&self) -> &'a str {
        self.mime
    }

    /// The declared subtype (text after `/`), if any.
    pub fn subtype(&self) -> Option<&'a str> {
        self.mime.split_once('/').map(|(_, sub)| sub)
    }

    /// The base64 data segment (still transport-encoded).
    pub fn data(&self) -> &'a str {
        self.data
    }
}

/// One captured fingerprint sample.
///
/// Capture clients send two shapes: a bare payload string, or a record whose
/// payload lives under `image` alongside arbitrary metadata (device info,
/// quality score, ...). Both shapes must round-trip unchanged apart from the
/// payload itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FingerSample {
    /// Metadata-wrapped capture.
    Annotated {
        image: String,
        #[serde(flatten)]
        metadata: serde_json::Map<String, serde_json::Value>,
    },
    /// Bare payload string.
    Plain(String),
}

impl FingerSample {
    /// The encoded image payload, regardless of shape.
    pub fn payload(&self) -> &str {
        match self {
            Self::Annotated { image, .. } => image,
            Self::Plain(payload) => payload,
        }
    }

    /// Rebuild the sample with a replacement payload, preserving shape and
    /// metadata verbatim.
    pub fn with_payload(&self, payload: String) -> Self {
        match self {
            Self::Annotated { metadata, .. } => Self::Annotated {
                image: payload,
                metadata: metadata.clone(),
            },
            Self::Plain(_) => Self::Plain(payload),
        }
    }
}

/// A named collection of fingerprint samples, one per finger
/// (e.g. `"left_thumb"`, `"right_index"`).
pub type FingerSampleSet = BTreeMap<String, FingerSample>;

/// Receipt for one sample persisted by ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSample {
    /// Path relative to the media root, for later URL construction.
    pub relative_path: String,
    /// Container format declared by the capture client.
    pub format: ContainerFormat,
    pub stored_at: DateTime<Utc>,
}

/// Ingestion result for one finger: either a freshly written file or an
/// opaque reference passed through unchanged (already stored elsewhere).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredRef {
    Saved(StoredSample),
    Passthrough(String),
}

impl StoredRef {
    /// The reference string the caller should persist on the record.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Saved(sample) => &sample.relative_path,
            Self::Passthrough(reference) => reference,
        }
    }
}

/// Mapping from finger name to its stored reference.
pub type StoredSampleRef = BTreeMap<String, StoredRef>;

/// Neighbourhood rule set used by the skeletonization stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThinningAlgorithm {
    /// Guo-Hall two-subiteration thinning (the default).
    GuoHall,
    /// Zhang-Suen two-subiteration thinning.
    ZhangSuen,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_uri_embedded_form() {
        let uri = DataUri::parse("data:image/png;base64,aGVsbG8=").expect("should parse");
        assert_eq!(uri.mime(), "image/png");
        assert_eq!(uri.subtype(), Some("png"));
        assert_eq!(uri.data(), "aGVsbG8=");
    }

    #[test]
    fn data_uri_without_scheme_prefix() {
        let uri = DataUri::parse("image/jpeg;base64,QUJD").expect("should parse");
        assert_eq!(uri.subtype(), Some("jpeg"));
    }

    #[test]
    fn data_uri_rejects_bare_base64() {
        assert!(DataUri::parse("aGVsbG8gd29ybGQ=").is_none());
    }

    #[test]
    fn finger_sample_shapes_round_trip() {
        let plain: FingerSample = serde_json::from_str("\"abc123\"").unwrap();
        assert_eq!(plain, FingerSample::Plain("abc123".into()));

        let annotated: FingerSample = serde_json::from_str(
            r#"{"image": "abc123", "device": "scanner-7", "quality": 0.92}"#,
        )
        .unwrap();
        assert_eq!(annotated.payload(), "abc123");

        let replaced = annotated.with_payload("xyz789".into());
        assert_eq!(replaced.payload(), "xyz789");
        match replaced {
            FingerSample::Annotated { metadata, .. } => {
                assert_eq!(metadata["device"], "scanner-7");
                assert_eq!(metadata["quality"], 0.92);
            }
            FingerSample::Plain(_) => panic!("shape must be preserved"),
        }
    }

    #[test]
    fn container_format_subtype_resolution() {
        assert_eq!(ContainerFormat::from_subtype("PNG"), Some(ContainerFormat::Png));
        assert_eq!(ContainerFormat::from_subtype("jpg"), Some(ContainerFormat::Jpeg));
        assert_eq!(ContainerFormat::from_subtype("svg+xml"), None);
        assert_eq!(ContainerFormat::Jpeg.extension(), "jpg");
    }
}
