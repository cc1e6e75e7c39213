// Parsing and normalization of model replies
// Author: kelexine (https://github.com/kelexine)

use crate::error::{GatewayError, Result};
use crate::metrics;
use crate::models::recipe::{ParsedModelOutput, Recipe};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::debug;

/// Remove markdown code-fence markers and surrounding whitespace.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse a model reply into a recipe, or into raw JSON when it is not one.
///
/// Only a reply that is not JSON at all is an error.
pub fn parse_model_response(raw: &str) -> Result<ParsedModelOutput> {
    let cleaned = strip_code_fences(raw);

    let value: Value = serde_json::from_str(&cleaned).map_err(|e| {
        metrics::record_model_reply("invalid_json");
        GatewayError::ResponseParse(e)
    })?;

    match serde_json::from_value::<Recipe>(value.clone()) {
        Ok(recipe) => {
            metrics::record_model_reply("recipe");
            Ok(ParsedModelOutput::Recipe(recipe))
        }
        Err(e) => {
            debug!("Model reply is not a recipe ({}), passing it through", e);
            metrics::record_model_reply("raw");
            Ok(ParsedModelOutput::RawJson(value))
        }
    }
}

/// Add `created_at` to a JSON object that lacks it. Other values pass through.
pub fn stamp_created_at(mut value: Value, now: DateTime<Utc>) -> Value {
    if let Value::Object(map) = &mut value {
        map.entry("created_at")
            .or_insert_with(|| Value::String(now.to_rfc3339()));
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    const RECIPE: &str = r#"{
        "recipe_name": "Shakshuka",
        "cuisine": "Maghrebi",
        "ingredients": [{"name": "eggs", "quantity": "4"}, {"name": "tomatoes"}],
        "steps": ["Simmer the sauce", "Poach the eggs"]
    }"#;

    #[test]
    fn test_valid_recipe_is_canonicalized() {
        let parsed = parse_model_response(RECIPE).unwrap();
        assert!(parsed.is_recipe());
        assert_eq!(
            parsed.into_value().unwrap(),
            json!({
                "recipe_name": "Shakshuka",
                "cuisine": "Maghrebi",
                "ingredients": [{"name": "eggs", "quantity": "4"}, {"name": "tomatoes"}],
                "steps": ["Simmer the sauce", "Poach the eggs"],
                "tags": []
            })
        );
    }

    #[test]
    fn test_fenced_reply_parses_like_plain_reply() {
        let fenced = format!("```json\n{}\n```", RECIPE);
        assert_eq!(
            parse_model_response(&fenced).unwrap(),
            parse_model_response(RECIPE).unwrap()
        );

        let bare_fence = format!("  ```{}```  ", RECIPE);
        assert_eq!(
            parse_model_response(&bare_fence).unwrap(),
            parse_model_response(RECIPE).unwrap()
        );
    }

    #[test]
    fn test_non_recipe_json_passes_through_unchanged() {
        let reply = r#"{"message": "This is not about food"}"#;
        let parsed = parse_model_response(reply).unwrap();
        assert_eq!(
            parsed,
            ParsedModelOutput::RawJson(json!({"message": "This is not about food"}))
        );

        let list = parse_model_response("[1, 2, 3]").unwrap();
        assert_eq!(list.into_value().unwrap(), json!([1, 2, 3]));
    }

    #[test]
    fn test_wrongly_typed_recipe_falls_back_to_raw() {
        let reply = r#"{"recipe_name": "Soup", "ingredients": "water", "steps": []}"#;
        assert!(matches!(
            parse_model_response(reply).unwrap(),
            ParsedModelOutput::RawJson(_)
        ));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        for reply in ["", "Sure! Here is your recipe:", r#"{"recipe_name": "Soup""#] {
            let err = parse_model_response(reply).unwrap_err();
            assert!(matches!(err, GatewayError::ResponseParse(_)));
            assert!(err.to_string().starts_with("Model response not valid JSON: "));
        }
    }

    #[test]
    fn test_stamp_adds_missing_created_at() {
        let now = Utc::now();
        let stamped = stamp_created_at(json!({"message": "hi"}), now);
        assert_eq!(stamped["created_at"], json!(now.to_rfc3339()));
    }

    #[test]
    fn test_stamp_keeps_existing_created_at() {
        let value = json!({"created_at": "2024-01-01T00:00:00+00:00"});
        assert_eq!(stamp_created_at(value.clone(), Utc::now()), value);
    }

    #[test]
    fn test_stamp_ignores_non_objects() {
        let now = Utc::now();
        assert_eq!(stamp_created_at(json!([1, 2]), now), json!([1, 2]));
        assert_eq!(stamp_created_at(json!("text"), now), json!("text"));
        assert_eq!(stamp_created_at(Value::Null, now), Value::Null);
    }

    proptest! {
        #[test]
        fn prop_fence_stripping_preserves_content(name in "[a-zA-Z ]{1,40}", fenced in any::<bool>()) {
            let plain = json!({
                "recipe_name": name,
                "ingredients": [{"name": "salt"}],
                "steps": ["Season"]
            })
            .to_string();
            let reply = if fenced { format!("```json\n{}\n```", plain) } else { plain.clone() };

            prop_assert_eq!(strip_code_fences(&reply), strip_code_fences(&plain));
            prop_assert_eq!(strip_code_fences(&strip_code_fences(&reply)), strip_code_fences(&reply));
            prop_assert_eq!(
                parse_model_response(&reply).unwrap(),
                parse_model_response(&plain).unwrap()
            );
        }
    }
}
