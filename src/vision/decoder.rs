// Decoding of uploaded base64 images
// Author: kelexine (https://github.com/kelexine)

use super::models::{is_natively_supported, validate_image_size, DecodedImage};
use crate::error::{GatewayError, Result};
use crate::metrics;
use crate::models::recipe::FileUpload;
use base64::Engine;
use image::ImageFormat;
use std::io::Cursor;
use tracing::{debug, warn};

/// Decode every upload that holds a readable image.
///
/// Entries that fail (bad base64, unknown or corrupt image data, oversized)
/// are logged and dropped; the rest keep their input order.
pub fn decode_images(files: &[FileUpload]) -> Vec<DecodedImage> {
    files
        .iter()
        .enumerate()
        .filter_map(|(index, file)| match decode_image(&file.base64) {
            Ok(image) => {
                debug!(
                    "Decoded file[{}]: {} {}x{}",
                    index,
                    image.mime_type(),
                    image.width,
                    image.height
                );
                metrics::record_image_decoded();
                Some(image)
            }
            Err(e) => {
                warn!("Skipping invalid image file[{}]: {}", index, e);
                metrics::record_image_skipped();
                None
            }
        })
        .collect()
}

/// Decode a single base64 payload into an image.
///
/// Accepts an optional `data:<mime>;base64,` prefix and embedded whitespace.
pub fn decode_image(payload: &str) -> Result<DecodedImage> {
    let encoded: String = strip_data_url(payload)
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded.as_bytes())
        .map_err(|e| GatewayError::ImageDecode(format!("Invalid base64 image data: {}", e)))?;

    validate_image_size(bytes.len()).map_err(GatewayError::ImageDecode)?;

    let format = image::guess_format(&bytes)
        .map_err(|e| GatewayError::ImageDecode(format!("Could not detect image format: {}", e)))?;

    let decoded = image::load_from_memory_with_format(&bytes, format)
        .map_err(|e| GatewayError::ImageDecode(format!("Corrupt {:?} image: {}", format, e)))?;

    let (width, height) = (decoded.width(), decoded.height());

    if is_natively_supported(format) {
        return Ok(DecodedImage {
            format,
            width,
            height,
            bytes,
        });
    }

    // Gemini only takes a few formats inline; convert the rest to PNG
    let mut png = Vec::new();
    decoded
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| GatewayError::ImageDecode(format!("PNG re-encode failed: {}", e)))?;

    Ok(DecodedImage {
        format: ImageFormat::Png,
        width,
        height,
        bytes: png,
    })
}

fn strip_data_url(payload: &str) -> &str {
    match payload.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => payload,
    }
}
