// Image generation relay
// Author: kelexine (https://github.com/kelexine)

use crate::config::ImageGenConfig;
use crate::error::{GatewayError, Result};
use crate::metrics;
use crate::models::image_gen::{ImageGenerationPayload, ImageGenerationRequest};
use crate::utils::logging::sanitize;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Plain-text body returned when the image API answers 200 with non-JSON.
pub const INVALID_UPSTREAM_BODY: &str = "Invalid response from image generation service";

/// Forwards illustration requests to the configured image-generation API.
///
/// Upstream errors are relayed verbatim; only transport failures and
/// malformed success bodies are turned into gateway errors.
#[derive(Debug, Clone)]
pub struct ImageRelay {
    http_client: Client,
    config: ImageGenConfig,
}

impl ImageRelay {
    pub fn new(config: &ImageGenConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .use_rustls_tls()
            .build()
            .map_err(|e| GatewayError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            config: config.clone(),
        })
    }

    pub async fn generate(&self, request: &ImageGenerationRequest) -> Result<Response> {
        if request.description.is_empty() {
            return Err(GatewayError::InvalidRequest("No description provided".to_string()));
        }

        let payload = ImageGenerationPayload::photorealistic(request.description.as_str());
        debug!("Requesting image generation from {}", self.config.url);

        let upstream = self
            .http_client
            .post(&self.config.url)
            .bearer_auth(&self.config.api_key)
            .header(header::ACCEPT, "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = upstream.status();
        let content_type = upstream.headers().get(header::CONTENT_TYPE).cloned();
        let body = upstream.bytes().await.map_err(|e| self.transport_error(e))?;
        metrics::record_image_relay(status.as_str());

        if status != StatusCode::OK {
            warn!(
                "Image generation service returned HTTP {}: {}",
                status,
                sanitize(&String::from_utf8_lossy(&body))
            );
            let mut response = (status, body).into_response();
            match content_type {
                Some(value) => {
                    response.headers_mut().insert(header::CONTENT_TYPE, value);
                }
                None => {
                    response.headers_mut().remove(header::CONTENT_TYPE);
                }
            }
            return Ok(response);
        }

        match serde_json::from_slice::<Value>(&body) {
            Ok(json) => Ok(Json(json).into_response()),
            Err(e) => {
                error!("Image generation service returned invalid JSON: {}", e);
                Ok((StatusCode::BAD_GATEWAY, INVALID_UPSTREAM_BODY).into_response())
            }
        }
    }

    fn transport_error(&self, e: reqwest::Error) -> GatewayError {
        error!("Image generation request failed: {:?}", e);
        metrics::record_image_relay("transport_error");
        GatewayError::ImageService(sanitize(&e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_description_is_rejected() {
        let relay = ImageRelay::new(&ImageGenConfig::default()).unwrap();
        let request = ImageGenerationRequest {
            description: String::new(),
        };

        let err = relay.generate(&request).await.unwrap_err();
        assert!(matches!(err, GatewayError::InvalidRequest(ref m) if m == "No description provided"));
    }

    #[tokio::test]
    async fn test_unconfigured_url_is_a_transport_error() {
        let relay = ImageRelay::new(&ImageGenConfig::default()).unwrap();
        let request = ImageGenerationRequest {
            description: "a croissant".to_string(),
        };

        let err = relay.generate(&request).await.unwrap_err();
        assert!(matches!(err, GatewayError::ImageService(_)));
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
