//! Text generation backends built on serdes-ai.

mod config;
mod error;

pub use config::LlmConfig;
pub use error::LlmError;

use async_trait::async_trait;
use serdes_ai::{agent::Agent, agent::AgentBuilder};
use std::sync::Arc;
use tracing::{debug, info_span, Instrument};

const MODEL_ENV: &str = "README_GENERATOR_LLM_MODEL";
const TEMPERATURE_ENV: &str = "README_GENERATOR_LLM_TEMPERATURE";
const DEFAULT_MODEL_SPEC: &str = "gemini:gemini-2.0-flash";
const LLM_TIMEOUT_SECS: u64 = 180; // 3 minutes

const SYSTEM_PROMPT: &str = "You are a technical writer who produces README.md files for \
software repositories. Reply with the complete README in Markdown and nothing else.";

/// A backend that turns a prompt into generated text.
#[async_trait]
pub trait TextBackend: Send + Sync {
    /// Generates text for `prompt`, limited to `max_output_tokens`.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError`] if the backend call fails or times out.
    async fn generate(&self, prompt: &str, max_output_tokens: u64) -> Result<String, LlmError>;
}

/// [`TextBackend`] backed by a serdes-ai model.
pub struct SerdesAiBackend {
    model: Arc<dyn serdes_ai_models::Model>,
    temperature: Option<f64>,
    timeout_secs: u64,
}

impl SerdesAiBackend {
    /// Builds the backend from the `[llm]` section, or from
    /// `README_GENERATOR_LLM_MODEL` when no section is present.
    ///
    /// The configured `timeout-secs` also bounds the whole generation call;
    /// without one the limit is three minutes.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::MissingCredential`] when no API key can be found,
    /// and [`LlmError::InvalidModelSpec`] for a malformed model spec.
    pub fn from_config(config: Option<&LlmConfig>) -> Result<Self, LlmError> {
        let model = resolve_model(config)?;
        Ok(Self {
            model,
            temperature: resolve_temperature(config),
            timeout_secs: config
                .and_then(LlmConfig::timeout_secs)
                .unwrap_or(LLM_TIMEOUT_SECS),
        })
    }

    fn build_agent(&self, max_output_tokens: u64) -> Agent<(), String> {
        let mut builder = AgentBuilder::from_arc(Arc::clone(&self.model))
            .system_prompt(SYSTEM_PROMPT)
            .max_tokens(max_output_tokens);
        if let Some(temp) = self.temperature {
            builder = builder.temperature(temp);
        }
        builder.build()
    }
}

#[async_trait]
impl TextBackend for SerdesAiBackend {
    async fn generate(&self, prompt: &str, max_output_tokens: u64) -> Result<String, LlmError> {
        let agent = self.build_agent(max_output_tokens);
        let span = info_span!("llm_generate", prompt_chars = prompt.len());
        let result = tokio::time::timeout(
            tokio::time::Duration::from_secs(self.timeout_secs),
            agent.run(prompt.to_string(), ()),
        )
        .instrument(span)
        .await
        .map_err(|_| LlmError::Timeout(self.timeout_secs))??;

        let text = result.output;
        debug!(chars = text.len(), "LLM response received");
        if text.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(text)
    }
}

/// Resolves the LLM model from config or environment.
fn resolve_model(
    config: Option<&LlmConfig>,
) -> Result<Arc<dyn serdes_ai_models::Model>, LlmError> {
    if let Some(config) = config {
        return config.build_model();
    }
    let spec = std::env::var(MODEL_ENV)
        .ok()
        .filter(|spec| !spec.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_MODEL_SPEC.to_string());
    LlmConfig::from_spec(&spec)?.build_model()
}

/// Validates that a temperature value is finite and within 0.0-2.0.
fn validate_temperature(value: f64, source: &str) -> Option<f64> {
    if !value.is_finite() || !(0.0..=2.0).contains(&value) {
        tracing::warn!(
            "Invalid temperature {value} from {source}: must be finite and in range 0.0-2.0"
        );
        return None;
    }
    Some(value)
}

/// Resolves the temperature from environment or config.
///
/// Environment variable takes precedence over config file.
fn resolve_temperature(config: Option<&LlmConfig>) -> Option<f64> {
    if let Ok(val) = std::env::var(TEMPERATURE_ENV) {
        if let Ok(temp) = val.parse::<f64>() {
            return validate_temperature(temp, "environment variable");
        }
    }
    config
        .and_then(LlmConfig::temperature)
        .and_then(|t| validate_temperature(t, "config file"))
}
