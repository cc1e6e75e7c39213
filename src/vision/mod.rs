//! Vision and image processing for uploaded photos.
//!
//! Clients attach photos of a dish or its ingredients as base64 strings.
//! This module turns them into images Gemini can read inline, validating
//! each one independently so a single bad upload never fails a request.
//!
//! # Submodules
//!
//! - `models`: The decoded image type and validation constraints.
//! - `decoder`: Base64 and image decoding with per-file fault isolation.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod decoder;
pub mod models;

pub use decoder::{decode_image, decode_images};
pub use models::DecodedImage;
