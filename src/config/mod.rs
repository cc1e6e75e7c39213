// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::error::{GatewayError, Result};
use config::{Config, Environment, File};
use std::path::{Path, PathBuf};

impl AppConfig {
    /// Load configuration from the default file location.
    ///
    /// See [`AppConfig::load_from`] for the precedence rules.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_config_path())
    }

    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest), e.g. `RECIPE_GATEWAY_GEMINI__API_KEY`
    /// 2. Config file at `path`, if it exists
    /// 3. Defaults (lowest)
    pub fn load_from(path: &Path) -> Result<Self> {
        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            // Load from config file if it exists
            .add_source(File::from(path.to_path_buf()).required(false))
            // Override with environment variables (prefix: RECIPE_GATEWAY_)
            .add_source(
                Environment::with_prefix("RECIPE_GATEWAY")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| GatewayError::Config(e.to_string()))
    }

    fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".recipe-gateway")
            .join("config.toml")
    }
}
