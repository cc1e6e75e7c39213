//! Generation pipelines behind the `/generate` routes.
//!
//! - `prompt`: Instruction text for the model.
//! - `parser`: Fence stripping, JSON parsing and recipe coercion.
//! - `recipe`: The recipe orchestrator tying decode, prompt, model and parse together.
//! - `image`: Passthrough relay to the image-generation API.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod image;
pub mod parser;
pub mod prompt;
pub mod recipe;

pub use image::{ImageRelay, INVALID_UPSTREAM_BODY};
pub use parser::{parse_model_response, stamp_created_at, strip_code_fences};
pub use prompt::build_prompt;
pub use recipe::RecipeGenerator;
