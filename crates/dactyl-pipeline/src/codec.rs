// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Payload codec — embedded-form markers, base64 transport encoding, and
// raster decode/encode. All pipeline stages operate on single-channel
// `GrayImage` buffers; this module is the only place payloads and rasters
// convert into each other.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::{GrayImage, ImageFormat};
use std::io::Cursor;
use tracing::debug;

use dactyl_core::error::{DactylError, Result};
use dactyl_core::types::{ContainerFormat, DataUri};

/// Decode an encoded payload into a grayscale raster.
///
/// Accepts either a bare base64 blob or the self-describing embedded form;
/// the marker prefix is stripped before decoding. Colour inputs are reduced
/// to luma.
pub fn decode_payload(payload: &str) -> Result<GrayImage> {
    let data = DataUri::parse(payload)
        .map(|uri| uri.data())
        .unwrap_or(payload);

    let bytes = BASE64
        .decode(data.trim())
        .map_err(|err| DactylError::Decode(format!("invalid base64: {err}")))?;

    let decoded = image::load_from_memory(&bytes)
        .map_err(|err| DactylError::Decode(format!("undecodable image container: {err}")))?;

    let raster = decoded.to_luma8();
    if raster.width() == 0 || raster.height() == 0 {
        return Err(DactylError::DegenerateImage(
            "decoded raster has zero extent".into(),
        ));
    }

    debug!(
        width = raster.width(),
        height = raster.height(),
        bytes = bytes.len(),
        "payload decoded"
    );
    Ok(raster)
}

/// Encode a raster into the requested container and re-apply the transport
/// encoding.
///
/// Returns a plain base64 string with no embedded-form marker — the caller
/// decides whether to re-wrap it. `quality` only applies to lossy containers
/// (JPEG, 1-100); lossless containers ignore it.
pub fn encode_gray(
    raster: &GrayImage,
    format: ContainerFormat,
    quality: Option<u8>,
) -> Result<String> {
    let mut buffer = Vec::new();
    match format {
        ContainerFormat::Jpeg => {
            let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(
                &mut buffer,
                quality.unwrap_or(90).clamp(1, 100),
            );
            raster.write_with_encoder(encoder).map_err(|err| {
                DactylError::UnsupportedFormat(format!("JPEG encoding failed: {err}"))
            })?;
        }
        _ => {
            let mut cursor = Cursor::new(&mut buffer);
            raster
                .write_to(&mut cursor, image_format(format))
                .map_err(|err| {
                    DactylError::UnsupportedFormat(format!(
                        "{} encoding failed: {err}",
                        format.mime_type()
                    ))
                })?;
        }
    }

    debug!(bytes = buffer.len(), format = format.mime_type(), "raster encoded");
    Ok(BASE64.encode(&buffer))
}

fn image_format(format: ContainerFormat) -> ImageFormat {
    match format {
        ContainerFormat::Png => ImageFormat::Png,
        ContainerFormat::Jpeg => ImageFormat::Jpeg,
        ContainerFormat::Bmp => ImageFormat::Bmp,
        ContainerFormat::Webp => ImageFormat::WebP,
        ContainerFormat::Tiff => ImageFormat::Tiff,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn gradient_raster() -> GrayImage {
        GrayImage::from_fn(64, 48, |x, y| Luma([((x * 3 + y) % 256) as u8]))
    }

    #[test]
    fn round_trip_bare_payload() {
        let raster = gradient_raster();
        let payload = encode_gray(&raster, ContainerFormat::Png, None).unwrap();
        let decoded = decode_payload(&payload).unwrap();
        assert_eq!(decoded.dimensions(), raster.dimensions());
        assert_eq!(decoded.as_raw(), raster.as_raw());
    }

    #[test]
    fn decode_strips_embedded_marker() {
        let raster = gradient_raster();
        let bare = encode_gray(&raster, ContainerFormat::Png, None).unwrap();
        let embedded = format!("data:image/png;base64,{bare}");
        let decoded = decode_payload(&embedded).unwrap();
        assert_eq!(decoded.dimensions(), raster.dimensions());
    }

    #[test]
    fn decode_rejects_garbage_base64() {
        let err = decode_payload("this is !!! not base64").unwrap_err();
        assert!(matches!(err, DactylError::Decode(_)));
    }

    #[test]
    fn decode_rejects_truncated_container() {
        // Valid base64, but the bytes are not a decodable image.
        let payload = BASE64.encode(b"\x89PNG\r\n\x1a\n_truncated_");
        let err = decode_payload(&payload).unwrap_err();
        assert!(matches!(err, DactylError::Decode(_)));
    }

    #[test]
    fn jpeg_quality_changes_output() {
        let raster = gradient_raster();
        let low = encode_gray(&raster, ContainerFormat::Jpeg, Some(10)).unwrap();
        let high = encode_gray(&raster, ContainerFormat::Jpeg, Some(95)).unwrap();
        assert_ne!(low, high);
        assert!(decode_payload(&high).is_ok());
    }
}
