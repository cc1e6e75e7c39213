// Image generation relay types
// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};

/// Body of `POST /generate/image`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageGenerationRequest {
    #[serde(default)]
    pub description: String,
}

/// Fixed-shape payload forwarded to the image-generation API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageGenerationPayload {
    pub style: &'static str,
    pub prompt: String,
    pub aspect_ratio: &'static str,
    pub output_format: &'static str,
    pub response_format: &'static str,
    pub width: u32,
    pub height: u32,
}

impl ImageGenerationPayload {
    /// Photorealistic 832x832 PNG, returned as a URL.
    pub fn photorealistic(prompt: impl Into<String>) -> Self {
        Self {
            style: "photorealism",
            prompt: prompt.into(),
            aspect_ratio: "1:1",
            output_format: "png",
            response_format: "url",
            width: 832,
            height: 832,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_shape() {
        let payload = ImageGenerationPayload::photorealistic("a bowl of ramen");
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "style": "photorealism",
                "prompt": "a bowl of ramen",
                "aspect_ratio": "1:1",
                "output_format": "png",
                "response_format": "url",
                "width": 832,
                "height": 832
            })
        );
    }
}
