//! Axum-based HTTP server implementation for the recipe gateway.
//!
//! This module is responsible for setting up the HTTP server, configuring routes,
//! and handling incoming requests from the web client.
//!
//! # Components
//!
//! - `handlers`: Implementation of individual API endpoints (status, generation, metrics).
//! - `middleware`: API-key gate, CORS, request IDs and request metrics.
//! - `routes`: The main router configuration that ties everything together.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;
mod middleware;
mod routes;

pub use handlers::StatusResponse;
pub use routes::{create_router, AppState};
