// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{generate_image_handler, generate_recipe_handler, metrics_handler, root_handler};
use super::middleware::{cors_layer, request_id_layers, require_api_key, track_metrics};
use crate::config::AppConfig;
use crate::error::Result;
use crate::generation::{ImageRelay, RecipeGenerator};
use axum::{extract::DefaultBodyLimit, middleware, routing::{get, post}, Router};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub recipes: Arc<RecipeGenerator>,
    pub images: Arc<ImageRelay>,
}

pub fn create_router(config: AppConfig) -> Result<Router> {
    let state = AppState {
        recipes: Arc::new(RecipeGenerator::new(config.gemini.clone())),
        images: Arc::new(ImageRelay::new(&config.image_gen)?),
        config: Arc::new(config),
    };

    let (set_request_id, propagate_request_id) = request_id_layers();

    let app = Router::new()
        .route("/", get(root_handler))
        .route("/metrics", get(metrics_handler))
        .route("/generate/recipe", post(generate_recipe_handler))
        .route("/generate/image", post(generate_image_handler))
        .layer(middleware::from_fn_with_state(state.clone(), require_api_key))
        .layer(middleware::from_fn(track_metrics))
        // Photos arrive base64-encoded inside the JSON body
        .layer(DefaultBodyLimit::max(state.config.server.max_body_bytes))
        .layer(RequestBodyLimitLayer::new(state.config.server.max_body_bytes))
        .layer(cors_layer(&state.config.server))
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state);

    Ok(app)
}
