//! Generation error types.

use crate::llm::LlmError;
use crate::prompt::PromptError;
use thiserror::Error;

/// Errors from [`Generator::generate`](super::Generator::generate).
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The request has no usable repository name or owner.
    #[error("Summary is missing the repository name or owner")]
    InvalidInput,

    /// No text generation backend is available.
    #[error("Generation backend is not configured: {0}")]
    Configuration(String),

    /// Prompt rendering failed.
    #[error("Failed to render prompt: {0}")]
    Prompt(#[from] PromptError),

    /// The backend call failed or returned nothing usable.
    #[error("Generation failed: {0}")]
    GenerationFailed(#[source] LlmError),
}

impl GenerateError {
    /// HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput => 400,
            Self::Configuration(_) | Self::Prompt(_) | Self::GenerationFailed(_) => 500,
        }
    }

    /// Message safe to show to the caller.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidInput => "Repository name and owner are required.",
            Self::Configuration(_) => "The text generation backend is not configured.",
            Self::Prompt(_) | Self::GenerationFailed(_) => "Failed to generate the README.",
        }
    }
}

impl From<LlmError> for GenerateError {
    fn from(error: LlmError) -> Self {
        if error.is_configuration() {
            Self::Configuration(error.to_string())
        } else {
            Self::GenerationFailed(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_to_status_codes() {
        assert_eq!(GenerateError::InvalidInput.status_code(), 400);
        assert_eq!(
            GenerateError::Configuration("no key".to_string()).status_code(),
            500
        );
        assert_eq!(
            GenerateError::GenerationFailed(LlmError::EmptyResponse).status_code(),
            500
        );
    }

    #[test]
    fn credential_errors_become_configuration_errors() {
        let error = GenerateError::from(LlmError::MissingCredential {
            provider: "gemini",
            env_var: "GOOGLE_API_KEY",
        });
        assert!(matches!(error, GenerateError::Configuration(_)));
        assert_eq!(
            error.user_message(),
            "The text generation backend is not configured."
        );
    }

    #[test]
    fn backend_failures_keep_their_source() {
        let error = GenerateError::from(LlmError::Timeout(180));
        assert!(matches!(
            error,
            GenerateError::GenerationFailed(LlmError::Timeout(180))
        ));
        assert_eq!(error.user_message(), "Failed to generate the README.");
    }
}
