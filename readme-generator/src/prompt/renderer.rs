//! Prompt renderer.

use super::context::PromptContext;
use crate::summary::RepositorySummary;
use handlebars::{no_escape, Handlebars};

/// Instruction template for README generation.
const README_PROMPT: &str = include_str!("readme_prompt.hbs");

/// Creates a configured Handlebars registry.
///
/// The registry is configured with:
/// - No HTML escaping (prompt text is plain Markdown)
/// - Strict mode (catches misspelled variables)
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();

    // Disable HTML escaping for markdown output
    hbs.register_escape_fn(no_escape);

    // Enable strict mode to catch missing variables
    hbs.set_strict_mode(true);

    hbs
}

/// Renders the README generation prompt.
pub struct PromptRenderer {
    handlebars: Handlebars<'static>,
}

impl Default for PromptRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptRenderer {
    /// Creates a new prompt renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlebars: create_handlebars_registry(),
        }
    }

    /// Renders the prompt for a summary.
    ///
    /// Every optional field gets its labeled line or block only when present.
    /// `additional_instructions` is appended verbatim as the final section.
    ///
    /// # Arguments
    ///
    /// * `summary` - The validated repository summary
    /// * `additional_instructions` - Optional free text from the user
    /// * `max_excerpt_chars` - Upper bound for each embedded file excerpt
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render(
        &self,
        summary: &RepositorySummary,
        additional_instructions: Option<&str>,
        max_excerpt_chars: usize,
    ) -> Result<String, super::PromptError> {
        let context = PromptContext::new(summary, additional_instructions, max_excerpt_chars);
        Ok(self.handlebars.render_template(README_PROMPT, &context)?)
    }
}
