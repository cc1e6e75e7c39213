// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::routes::AppState;
use crate::error::{GatewayError, Result};
use crate::models::image_gen::ImageGenerationRequest;
use crate::models::recipe::RecipePrompt;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
    pub server_time: String,
    pub server_timezone: String,
}

/// Handler for `/`, reachable without an API key
pub async fn root_handler() -> Json<StatusResponse> {
    let now = chrono::Local::now();
    Json(StatusResponse {
        status: "success".to_string(),
        message: "Recipe Generator API is running.".to_string(),
        server_time: now.format("%Y-%m-%d %H:%M:%S").to_string(),
        server_timezone: now.format("%Z").to_string(),
    })
}

/// Handler for `/generate/recipe`
pub async fn generate_recipe_handler(
    State(state): State<AppState>,
    body: String, // Get raw JSON as string first
) -> Result<Response> {
    let prompt: RecipePrompt = parse_body(&body)?;

    info!(
        "Received recipe request: text_len={}, language={}, files={}",
        prompt.text.len(),
        prompt.language,
        prompt.files.len()
    );

    let recipe = state.recipes.generate(&prompt).await?;
    Ok(Json(recipe).into_response())
}

/// Handler for `/generate/image`
pub async fn generate_image_handler(
    State(state): State<AppState>,
    body: String,
) -> Result<Response> {
    let request: ImageGenerationRequest = parse_body(&body)?;

    info!(
        "Received image generation request: description_len={}",
        request.description.len()
    );

    state.images.generate(&request).await
}

/// Handler for `/metrics` (Prometheus text format)
pub async fn metrics_handler() -> Response {
    match crate::metrics::gather_metrics() {
        Ok(body) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => {
            error!("Failed to encode metrics: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Manually deserialize to get JSON error bodies instead of axum rejections
fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        error!("Failed to deserialize request: {}", e);
        debug!(
            "Raw body (first 500 chars): {}",
            body.chars().take(500).collect::<String>()
        );
        GatewayError::InvalidRequest(format!("Invalid request body: {}", e))
    })
}
