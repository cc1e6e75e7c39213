//! Data models for the gateway and its upstream APIs.
//!
//! This module contains the type definitions for request/response bodies used by:
//! - The inbound recipe API and the recipe schema (`recipe`)
//! - The upstream Google Gemini API (`gemini`)
//! - The image-generation relay (`image_gen`)

// Author: kelexine (https://github.com/kelexine)

pub mod gemini;
pub mod image_gen;
pub mod recipe;

pub use gemini::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, InlineData, Part};
pub use image_gen::{ImageGenerationPayload, ImageGenerationRequest};
pub use recipe::{recipe_schema, FileUpload, Ingredient, ParsedModelOutput, Recipe, RecipePrompt};
