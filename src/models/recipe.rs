// Recipe request and response types
// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Body of `POST /generate/recipe`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipePrompt {
    /// Free-form description of a dish or a list of ingredients.
    #[serde(default)]
    pub text: String,

    /// Language the recipe must be written in.
    #[serde(default = "default_language")]
    pub language: String,

    /// Optional photos of the dish or ingredients.
    #[serde(default)]
    pub files: Vec<FileUpload>,
}

fn default_language() -> String {
    "en".to_string()
}

/// An uploaded file, as sent by the web client.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileUpload {
    #[serde(default)]
    pub base64: String,
}

/// A recipe as produced by the model.
///
/// Deserializing into this type is the schema validation step; serializing
/// it back gives the canonical field set returned to clients. Unknown fields
/// are dropped and absent optional fields are omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub recipe_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,

    pub ingredients: Vec<Ingredient>,

    pub steps: Vec<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    /// URL of an illustration, filled in by the client after `/generate/image`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Returns the response schema sent to Gemini for recipe generation.
///
/// Mirrors [`Recipe`]; `created_at` and `image` are left out because the
/// gateway and the client own them.
pub fn recipe_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "recipe_name": { "type": "string" },
            "description": { "type": "string" },
            "cuisine": { "type": "string" },
            "servings": { "type": "integer" },
            "prep_time": { "type": "string" },
            "cook_time": { "type": "string" },
            "difficulty": { "type": "string" },
            "ingredients": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "quantity": { "type": "string" },
                        "unit": { "type": "string" }
                    },
                    "required": ["name"]
                }
            },
            "steps": {
                "type": "array",
                "items": { "type": "string" }
            },
            "tags": {
                "type": "array",
                "items": { "type": "string" }
            }
        },
        "required": ["recipe_name", "ingredients", "steps"]
    })
}

/// Outcome of parsing a model reply.
///
/// A reply that is valid JSON but does not fit [`Recipe`] is an expected
/// outcome (the model judged the input unrelated to food), not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedModelOutput {
    Recipe(Recipe),
    RawJson(Value),
}

impl ParsedModelOutput {
    /// Converts the output to the JSON returned to the client.
    pub fn into_value(self) -> serde_json::Result<Value> {
        match self {
            ParsedModelOutput::Recipe(recipe) => serde_json::to_value(recipe),
            ParsedModelOutput::RawJson(value) => Ok(value),
        }
    }

    pub fn is_recipe(&self) -> bool {
        matches!(self, ParsedModelOutput::Recipe(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_defaults() {
        let prompt: RecipePrompt = serde_json::from_str(r#"{"text": "pasta"}"#).unwrap();
        assert_eq!(prompt.language, "en");
        assert!(prompt.files.is_empty());

        let prompt: RecipePrompt = serde_json::from_str(r#"{"files": [{}]}"#).unwrap();
        assert_eq!(prompt.text, "");
        assert_eq!(prompt.files[0].base64, "");
    }

    #[test]
    fn test_recipe_canonical_form_drops_unknown_and_absent_fields() {
        let recipe: Recipe = serde_json::from_value(json!({
            "recipe_name": "Omelette",
            "ingredients": [{"name": "egg", "quantity": "3"}],
            "steps": ["Beat the eggs", "Cook"],
            "chef_notes": "not in the schema"
        }))
        .unwrap();

        let value = serde_json::to_value(&recipe).unwrap();
        assert_eq!(
            value,
            json!({
                "recipe_name": "Omelette",
                "ingredients": [{"name": "egg", "quantity": "3"}],
                "steps": ["Beat the eggs", "Cook"],
                "tags": []
            })
        );
    }

    #[test]
    fn test_schema_required_fields_match_recipe() {
        let schema = recipe_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(required, vec!["recipe_name", "ingredients", "steps"]);
        assert!(schema["properties"].get("created_at").is_none());
    }
}
