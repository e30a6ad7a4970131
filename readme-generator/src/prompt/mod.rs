//! Prompt assembly for README generation.
//!
//! The prompt is rendered from a Handlebars template so each optional
//! summary field maps to one conditional block.

mod context;
mod error;
mod renderer;

pub use error::PromptError;
pub use renderer::{create_handlebars_registry, PromptRenderer};
