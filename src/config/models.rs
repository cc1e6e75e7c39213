//! Configuration data structures for the recipe gateway.
//!
//! This module defines the schema for the application settings, including
//! server parameters, the API-key gate, and the two upstream services
//! (Gemini for recipes, the image-generation API for illustrations).
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::{Deserialize, Serialize};

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port, CORS, body limit).
    #[serde(default)]
    pub server: ServerConfig,

    /// Shared-secret gate in front of every non-public route.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Upstream Gemini API settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Upstream image-generation API settings.
    #[serde(default)]
    pub image_gen: ImageGenConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `127.0.0.1`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `8080`
    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed by the CORS layer.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Maximum accepted request body, in bytes.
    /// Default: 50 MiB (base64 photos inflate by a third)
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

/// Settings for the `api-key` header gate.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    /// Expected value of the `api-key` request header.
    /// An empty key disables the gate.
    #[serde(default)]
    pub api_key: String,
}

/// Settings for the upstream Gemini API connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key sent as `x-goog-api-key`.
    #[serde(default)]
    pub api_key: String,

    /// Base URL for the Generative Language API.
    /// Default: `https://generativelanguage.googleapis.com/v1beta`
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Model used for recipe generation.
    /// Default: `gemini-2.5-flash`
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds.
    /// Default: `120`
    #[serde(default = "default_gemini_timeout")]
    pub timeout_seconds: u64,
}

/// Settings for the upstream image-generation API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageGenConfig {
    /// Bearer token for the image API.
    #[serde(default)]
    pub api_key: String,

    /// Full URL the generation payload is POSTed to.
    #[serde(default)]
    pub url: String,

    /// Request timeout in seconds.
    /// Default: `60`
    #[serde(default = "default_image_timeout")]
    pub timeout_seconds: u64,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base_url: default_api_base_url(),
            model: default_model(),
            timeout_seconds: default_gemini_timeout(),
        }
    }
}

impl Default for ImageGenConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            url: String::new(),
            timeout_seconds: default_image_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Helper functions for serde defaults
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origins() -> Vec<String> {
    [
        "http://localhost:3000",
        "http://127.0.0.1:3000",
        "https://cook-book-ruby.vercel.app",
        "https://www.coooke.fr",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_max_body_bytes() -> usize {
    50 * 1024 * 1024
}

fn default_api_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_gemini_timeout() -> u64 {
    120
}

fn default_image_timeout() -> u64 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
