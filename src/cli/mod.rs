// CLI module for recipe-gateway
// Author: kelexine (https://github.com/kelexine)

use clap::Parser;
use std::path::PathBuf;

/// recipe-gateway - Gemini-backed recipe and illustration gateway
#[derive(Parser, Debug)]
#[command(name = "recipe-gateway", version, about, long_about = None)]
pub struct Args {
    /// Path to the TOML config file (default: ~/.recipe-gateway/config.toml)
    #[arg(long, env = "RECIPE_GATEWAY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the bind address from the config file
    #[arg(long)]
    pub host: Option<String>,

    /// Override the port from the config file
    #[arg(long)]
    pub port: Option<u16>,
}
