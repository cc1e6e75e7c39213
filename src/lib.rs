// recipe-gateway - Gemini-backed recipe and illustration gateway
// Author: kelexine (https://github.com/kelexine)

pub mod cli;
pub mod config;
pub mod error;
pub mod gemini;
pub mod generation;
pub mod metrics;
pub mod models;
pub mod server;
pub mod utils;
pub mod vision;
