// Prompt construction for recipe generation
// Author: kelexine (https://github.com/kelexine)

/// Build the instruction sent to the model along with any photos.
///
/// `text` is expected to be trimmed already.
pub fn build_prompt(text: &str, language: &str) -> String {
    format!(
        "Analyze the following user input: \"{text}\" and return an appropriate response in {language}:\n\
         1. If the input is not related to ingredients or a dish, return a JSON object with a single \
         \"message\" field explaining why no recipe can be made. Do not add created_at and do not \
         follow the Recipe schema.\n\
         2. If the input is relevant and describes specific ingredients or a dish, return a \
         corresponding recipe as a JSON object matching the Recipe schema.\n\
         Note: The response must be formulated in the language {language} and must be only JSON, \
         without any other message and without markdown code fences."
    )
}
