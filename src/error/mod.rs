// Error types for the recipe gateway
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    /// Missing or empty required input. The message is returned verbatim.
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Invalid API key")]
    Unauthorized,

    #[error("Model call failed: {0}")]
    ModelCall(String),

    #[error("Model response not valid JSON: {0}")]
    ResponseParse(#[source] serde_json::Error),

    /// Per-file decode failure. Logged and skipped, never sent to a caller.
    #[error("Invalid image file: {0}")]
    ImageDecode(String),

    #[error("Image generation request failed: {0}")]
    ImageService(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// HTTP status this error maps to at the API boundary.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidRequest(_) | GatewayError::ImageDecode(_) => StatusCode::BAD_REQUEST,
            GatewayError::Unauthorized => StatusCode::UNAUTHORIZED,
            GatewayError::ModelCall(_) | GatewayError::ImageService(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            GatewayError::ResponseParse(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Convert GatewayError to HTTP responses for Axum
impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            GatewayError::Unauthorized => json!({
                "code": "unauthorized",
                "message": "You are not authorized to access this service",
                "details": self.to_string(),
            }),
            _ => json!({ "error": self.to_string() }),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
