//! LLM error types.

use thiserror::Error;

/// Errors from backend configuration and text generation.
#[derive(Debug, Error)]
pub enum LlmError {
    /// No API key configured for the provider.
    #[error("No API key for provider '{provider}'; set api-key in config.toml or {env_var}")]
    MissingCredential {
        provider: &'static str,
        env_var: &'static str,
    },

    /// Model spec is not `provider:model` with a known provider.
    #[error("Invalid model spec '{0}'; expected provider:model with provider openai, openrouter, anthropic or gemini")]
    InvalidModelSpec(String),

    /// Generation timed out.
    #[error("LLM timed out after {0} seconds")]
    Timeout(u64),

    /// Backend returned no text.
    #[error("LLM returned an empty response")]
    EmptyResponse,

    /// Model error.
    #[error("Model error: {0}")]
    Model(#[from] serdes_ai_models::ModelError),

    /// Agent run error.
    #[error("Agent run error: {0}")]
    AgentRun(#[from] serdes_ai::agent::AgentRunError),
}

impl LlmError {
    /// Returns true if the error means the backend was never usable.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingCredential { .. } | Self::InvalidModelSpec(_)
        )
    }
}
