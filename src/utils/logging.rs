//! Structured logging and security-focused trace utilities.
//!
//! This module configures the `tracing` ecosystem for the application,
//! supporting multiple output formats and providing utilities to prevent
//! API keys from leaking into logs or error bodies.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LoggingConfig;
use crate::error::{GatewayError, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber for the application.
///
/// Supports two output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `pretty` (default): Human-readable, colorized output for development.
///
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    // Configure filter from environment or config file
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| GatewayError::Config(format!("Invalid log level '{}': {}", config.level, e)))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        _ => registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init(),
    }
    .map_err(|e| GatewayError::Internal(format!("Failed to initialize logging: {}", e)))
}

/// Sanitizes sensitive information from log messages.
///
/// Replaces every Google API key (`AIza...`) and every bearer token with a
/// `\[REDACTED\]` placeholder.
///
/// # Arguments
///
/// * `input` - The raw string that may contain sensitive data.
///
/// # Returns
///
/// A new string where all detected secrets have been replaced.
pub fn sanitize(input: &str) -> String {
    let result = redact_after(input, "AIza", "[REDACTED_API_KEY]", true);
    redact_after(&result, "Bearer ", "[REDACTED_TOKEN]", false)
}

/// Replace each token that follows `marker` up to the next delimiter.
/// With `include_marker` the marker itself is part of the secret.
fn redact_after(input: &str, marker: &str, placeholder: &str, include_marker: bool) -> String {
    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find(marker) {
        let token_start = pos + marker.len();
        let token_len = rest[token_start..]
            .find(|c: char| c.is_whitespace() || c == '"' || c == '\'' || c == '&' || c == ',')
            .unwrap_or(rest.len() - token_start);

        if include_marker {
            output.push_str(&rest[..pos]);
        } else {
            output.push_str(&rest[..token_start]);
        }

        if include_marker || token_len > 0 {
            output.push_str(placeholder);
        }
        rest = &rest[token_start + token_len..];
    }

    output.push_str(rest);
    output
}
