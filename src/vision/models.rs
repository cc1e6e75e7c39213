// Vision models and types
// Author: kelexine (https://github.com/kelexine)

use crate::models::gemini::InlineData;
use base64::Engine;
use image::ImageFormat;

/// An uploaded image that decoded successfully.
///
/// `bytes` holds an encoding Gemini accepts: the original upload when its
/// format is natively supported, a PNG re-encode otherwise.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

impl DecodedImage {
    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }

    /// Inline-data part payload for a Gemini request
    pub fn to_inline_data(&self) -> InlineData {
        InlineData {
            mime_type: self.mime_type().to_string(),
            data: base64::engine::general_purpose::STANDARD.encode(&self.bytes),
        }
    }
}

/// Whether Gemini accepts this format as inline data without conversion
pub fn is_natively_supported(format: ImageFormat) -> bool {
    matches!(format, ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::WebP)
}

/// Validation limits
pub const MAX_IMAGE_SIZE_BYTES: usize = 20 * 1024 * 1024; // 20MB (Gemini inline limit)

/// Validate image data size
pub fn validate_image_size(data_len: usize) -> Result<(), String> {
    if data_len > MAX_IMAGE_SIZE_BYTES {
        return Err(format!(
            "Image size {} bytes exceeds maximum of {} bytes (20MB)",
            data_len, MAX_IMAGE_SIZE_BYTES
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_formats() {
        assert!(is_natively_supported(ImageFormat::Png));
        assert!(is_natively_supported(ImageFormat::Jpeg));
        assert!(is_natively_supported(ImageFormat::WebP));
        assert!(!is_natively_supported(ImageFormat::Gif));
        assert!(!is_natively_supported(ImageFormat::Bmp));
    }

    #[test]
    fn test_validate_image_size() {
        assert!(validate_image_size(1024).is_ok());
        assert!(validate_image_size(MAX_IMAGE_SIZE_BYTES).is_ok());
        assert!(validate_image_size(MAX_IMAGE_SIZE_BYTES + 1).is_err());
    }

    #[test]
    fn test_inline_data_round_trips_bytes() {
        let image = DecodedImage {
            format: ImageFormat::Png,
            width: 1,
            height: 1,
            bytes: vec![1, 2, 3],
        };
        let inline = image.to_inline_data();
        assert_eq!(inline.mime_type, "image/png");
        assert_eq!(inline.data, "AQID");
    }
}
