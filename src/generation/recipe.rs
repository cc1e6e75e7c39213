// Recipe generation pipeline
// Author: kelexine (https://github.com/kelexine)

use super::parser::{parse_model_response, stamp_created_at};
use super::prompt::build_prompt;
use crate::config::GeminiConfig;
use crate::error::{GatewayError, Result};
use crate::gemini::GeminiClient;
use crate::models::gemini::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part};
use crate::models::recipe::{recipe_schema, RecipePrompt};
use crate::vision::{decode_images, DecodedImage};
use chrono::Utc;
use serde_json::Value;
use tracing::{debug, error, info};

/// Turns a [`RecipePrompt`] into a recipe (or the model's explanation of why
/// it could not make one).
///
/// Pipeline: validate text, decode photos, build the prompt, call Gemini,
/// parse the reply, stamp `created_at`.
#[derive(Debug, Clone)]
pub struct RecipeGenerator {
    config: GeminiConfig,
}

impl RecipeGenerator {
    pub fn new(config: GeminiConfig) -> Self {
        Self { config }
    }

    pub async fn generate(&self, prompt: &RecipePrompt) -> Result<Value> {
        let text = prompt.text.trim();
        if text.is_empty() {
            return Err(GatewayError::InvalidRequest("No text provided".to_string()));
        }

        let images = decode_images(&prompt.files);
        info!(
            "Generating recipe: language={}, images={}/{}",
            prompt.language,
            images.len(),
            prompt.files.len()
        );

        let instruction = build_prompt(text, &prompt.language);

        let reply = self.invoke_model(&instruction, &images).await.map_err(|e| {
            error!("Model call failed: {:?}", e);
            e
        })?;

        let parsed = parse_model_response(&reply).map_err(|e| {
            error!("Failed to parse model response: {:?}", e);
            debug!("Unparseable reply (first 500 chars): {}", reply.chars().take(500).collect::<String>());
            e
        })?;

        Ok(stamp_created_at(parsed.into_value()?, Utc::now()))
    }

    /// Send the prompt and photos to Gemini and return the reply text.
    ///
    /// The client only lives for this call.
    async fn invoke_model(&self, instruction: &str, images: &[DecodedImage]) -> Result<String> {
        let client = GeminiClient::new(&self.config)?;
        let request = build_request(instruction, images);

        let response = client.generate_content(&request).await?;
        response
            .text()
            .ok_or_else(|| GatewayError::ModelCall(describe_empty_reply(&response)))
    }
}

/// Gemini request carrying the instruction, every photo, and the recipe
/// schema as the JSON output constraint.
pub fn build_request(instruction: &str, images: &[DecodedImage]) -> GenerateContentRequest {
    let mut parts = Vec::with_capacity(images.len() + 1);
    parts.push(Part::text(instruction));
    parts.extend(images.iter().map(|image| Part::InlineData {
        inline_data: image.to_inline_data(),
    }));

    GenerateContentRequest {
        contents: vec![Content::user(parts)],
        generation_config: Some(GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(recipe_schema()),
            ..Default::default()
        }),
    }
}

fn describe_empty_reply(response: &GenerateContentResponse) -> String {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|feedback| feedback.block_reason.as_deref())
    {
        return format!("prompt blocked: {}", reason);
    }

    match response
        .candidates
        .first()
        .and_then(|candidate| candidate.finish_reason.as_deref())
    {
        Some(reason) => format!("empty response (finish reason: {})", reason),
        None => "empty response".to_string(),
    }
}
