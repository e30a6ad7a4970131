//! Document generation.
//!
//! Validates a summary, renders the prompt and makes a single call to the
//! configured [`TextBackend`]. The backend's text is returned unchanged.

mod error;
mod request;

pub use error::GenerateError;
pub use request::GenerationRequest;

use crate::config::GenerationConfig;
use crate::llm::TextBackend;
use crate::prompt::PromptRenderer;
use crate::summary::GeneratedDocument;
use std::sync::Arc;
use tracing::{debug, info, info_span, Instrument};

enum Backend {
    Ready(Arc<dyn TextBackend>),
    Unconfigured(String),
}

/// Produces README documents from repository summaries.
pub struct Generator {
    backend: Backend,
    renderer: PromptRenderer,
    limits: GenerationConfig,
}

impl Generator {
    /// Creates a generator that calls `backend`.
    #[must_use]
    pub fn new(backend: Arc<dyn TextBackend>, limits: GenerationConfig) -> Self {
        Self {
            backend: Backend::Ready(backend),
            renderer: PromptRenderer::new(),
            limits,
        }
    }

    /// Creates a generator whose every request fails with
    /// [`GenerateError::Configuration`].
    ///
    /// Used when no credential was found at startup so analysis can still be
    /// served.
    #[must_use]
    pub fn unconfigured(reason: impl Into<String>, limits: GenerationConfig) -> Self {
        Self {
            backend: Backend::Unconfigured(reason.into()),
            renderer: PromptRenderer::new(),
            limits,
        }
    }

    /// Returns true if a backend is available.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        matches!(self.backend, Backend::Ready(_))
    }

    /// Generates a README for the summary in `request`.
    ///
    /// Validation happens before anything else; an invalid request never
    /// reaches the backend.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::InvalidInput`] if the summary lacks a name or
    /// owner, [`GenerateError::Configuration`] if no backend is available, and
    /// [`GenerateError::GenerationFailed`] if the backend call fails or
    /// returns empty text.
    pub async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GeneratedDocument, GenerateError> {
        let instructions = request.instructions().map(str::to_string);
        let summary = request
            .summary
            .into_summary()
            .ok_or(GenerateError::InvalidInput)?;

        let backend = match &self.backend {
            Backend::Ready(backend) => backend,
            Backend::Unconfigured(reason) => {
                return Err(GenerateError::Configuration(reason.clone()));
            }
        };

        let prompt = self.renderer.render(
            &summary,
            instructions.as_deref(),
            self.limits.max_excerpt_chars,
        )?;
        debug!(chars = prompt.len(), "Rendered prompt");

        let span = info_span!("generate", owner = %summary.owner, repo = %summary.name);
        let document = backend
            .generate(&prompt, self.limits.max_output_tokens)
            .instrument(span)
            .await?;
        if document.trim().is_empty() {
            return Err(GenerateError::GenerationFailed(
                crate::llm::LlmError::EmptyResponse,
            ));
        }

        info!(chars = document.len(), "Generated README");
        Ok(GeneratedDocument { document })
    }
}
