// Gemini API client
// Author: kelexine (https://github.com/kelexine)

use crate::config::GeminiConfig;
use crate::error::{GatewayError, Result};
use crate::metrics;
use crate::models::gemini::{GenerateContentRequest, GenerateContentResponse};
use crate::utils::logging::sanitize;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error};

/// Client for the Google Gemini `generateContent` API.
///
/// Built per request and dropped when the request scope ends. Dropping the
/// client closes its connection pool, which also happens when the handler
/// future is cancelled mid-call.
pub struct GeminiClient {
    http_client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a new Gemini client from configuration.
    ///
    /// Fails when no API key is configured or the HTTP client cannot be built.
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(GatewayError::ModelCall("No Gemini API key configured".to_string()));
        }

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .use_rustls_tls()
            .build()
            .map_err(|e| GatewayError::ModelCall(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Created Gemini client for model {}", config.model);

        Ok(Self {
            http_client,
            config: config.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Call Gemini `generateContent` and return the decoded envelope.
    ///
    /// Transport failures, non-2xx statuses and undecodable envelopes all
    /// surface as [`GatewayError::ModelCall`].
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = self.endpoint();
        debug!("Calling generateContent API for model: {}", self.config.model);

        let start = Instant::now();
        let result = self.send(&url, request).await;
        metrics::record_gemini_call(&self.config.model, result.is_ok(), start.elapsed().as_secs_f64());

        let response = result?;
        if let Some(usage) = &response.usage_metadata {
            metrics::record_tokens(
                &self.config.model,
                usage.prompt_token_count.unwrap_or(0),
                usage.candidates_token_count.unwrap_or(0),
            );
        }

        debug!("Successfully received Gemini response");
        Ok(response)
    }

    async fn send(&self, url: &str, request: &GenerateContentRequest) -> Result<GenerateContentResponse> {
        let response = self
            .http_client
            .post(url)
            .header("x-goog-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| GatewayError::ModelCall(format!("HTTP error: {}", e)))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| GatewayError::ModelCall(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            let message = Self::extract_error_message(&response_text)
                .unwrap_or_else(|| response_text.clone());
            error!(
                "Gemini API error: HTTP {} - Response body: {}",
                status,
                sanitize(&response_text)
            );
            return Err(GatewayError::ModelCall(format!("HTTP {}: {}", status, sanitize(&message))));
        }

        debug!(
            "Raw Gemini response (first 500 chars): {}",
            response_text.chars().take(500).collect::<String>()
        );

        serde_json::from_str(&response_text).map_err(|e| {
            error!("Failed to parse Gemini response: {}", e);
            GatewayError::ModelCall(format!("Response parsing error: {}", e))
        })
    }

    /// Extract error message from API response JSON
    fn extract_error_message(response_text: &str) -> Option<String> {
        #[derive(serde::Deserialize)]
        struct ErrorResponse {
            error: Option<ErrorDetail>,
        }

        #[derive(serde::Deserialize)]
        struct ErrorDetail {
            message: Option<String>,
            status: Option<String>,
        }

        let error = serde_json::from_str::<ErrorResponse>(response_text).ok()?.error?;
        error.message.or(error.status)
    }
}

impl Drop for GeminiClient {
    fn drop(&mut self) {
        debug!("Released Gemini client for model {}", self.config.model);
    }
}
