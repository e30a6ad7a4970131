//! LLM provider configuration.

use crate::llm::error::LlmError;
use serdes_ai_models::{build_model_with_config, openrouter::OpenRouterModel, Model};
use std::sync::Arc;

/// Environment variables holding each provider's API key, in lookup order.
const CREDENTIAL_ENV: &[(&str, &[&str])] = &[
    ("openai", &["OPENAI_API_KEY"]),
    ("openrouter", &["OPENROUTER_API_KEY"]),
    ("anthropic", &["ANTHROPIC_API_KEY"]),
    (
        "gemini",
        &["GOOGLE_API_KEY", "GOOGLE_GENERATIVE_AI_API_KEY"],
    ),
];

/// Provider-specific configuration from the `[llm]` section of `config.toml`.
#[derive(Clone, PartialEq, serde::Deserialize)]
#[serde(tag = "provider", rename_all = "snake_case")]
pub enum LlmConfig {
    /// OpenAI provider configuration.
    #[serde(rename = "openai")]
    OpenAi {
        /// Model name (e.g., "gpt-4o").
        model: String,
        /// API key (optional, falls back to OPENAI_API_KEY env var).
        #[serde(rename = "api-key")]
        api_key: Option<String>,
        /// Base URL (optional).
        #[serde(rename = "base-url")]
        base_url: Option<String>,
        /// Timeout in seconds (optional).
        #[serde(rename = "timeout-secs")]
        timeout_secs: Option<u64>,
        /// Sampling temperature (optional).
        temperature: Option<f64>,
    },

    /// OpenRouter provider configuration.
    #[serde(rename = "openrouter")]
    OpenRouter {
        /// Model name (e.g., "anthropic/claude-3-opus").
        model: String,
        /// API key (optional, falls back to OPENROUTER_API_KEY env var).
        #[serde(rename = "api-key")]
        api_key: Option<String>,
        /// HTTP Referer header (optional).
        #[serde(rename = "http-referer")]
        http_referer: Option<String>,
        /// App title header (optional).
        #[serde(rename = "app-title")]
        app_title: Option<String>,
        /// Sampling temperature (optional).
        temperature: Option<f64>,
    },

    /// Anthropic provider configuration.
    Anthropic {
        /// Model name (e.g., "claude-3-5-sonnet-20241022").
        model: String,
        /// API key (optional, falls back to ANTHROPIC_API_KEY env var).
        #[serde(rename = "api-key")]
        api_key: Option<String>,
        /// Base URL (optional).
        #[serde(rename = "base-url")]
        base_url: Option<String>,
        /// Timeout in seconds (optional).
        #[serde(rename = "timeout-secs")]
        timeout_secs: Option<u64>,
        /// Sampling temperature (optional).
        temperature: Option<f64>,
    },

    /// Gemini provider configuration.
    Gemini {
        /// Model name (e.g., "gemini-2.0-flash").
        model: String,
        /// API key (optional, falls back to GOOGLE_API_KEY or
        /// GOOGLE_GENERATIVE_AI_API_KEY env vars).
        #[serde(rename = "api-key")]
        api_key: Option<String>,
        /// Base URL (optional).
        #[serde(rename = "base-url")]
        base_url: Option<String>,
        /// Timeout in seconds (optional).
        #[serde(rename = "timeout-secs")]
        timeout_secs: Option<u64>,
        /// Sampling temperature (optional).
        temperature: Option<f64>,
    },
}

// Keeps API keys out of logs.
impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redacted = |key: &Option<String>| key.as_ref().map(|_| "<redacted>");
        match self {
            Self::OpenRouter {
                model,
                api_key,
                http_referer,
                app_title,
                temperature,
            } => f
                .debug_struct("OpenRouter")
                .field("model", model)
                .field("api_key", &redacted(api_key))
                .field("http_referer", http_referer)
                .field("app_title", app_title)
                .field("temperature", temperature)
                .finish(),
            Self::OpenAi {
                model,
                api_key,
                base_url,
                timeout_secs,
                temperature,
            }
            | Self::Anthropic {
                model,
                api_key,
                base_url,
                timeout_secs,
                temperature,
            }
            | Self::Gemini {
                model,
                api_key,
                base_url,
                timeout_secs,
                temperature,
            } => f
                .debug_struct(match self {
                    Self::OpenAi { .. } => "OpenAi",
                    Self::Anthropic { .. } => "Anthropic",
                    _ => "Gemini",
                })
                .field("model", model)
                .field("api_key", &redacted(api_key))
                .field("base_url", base_url)
                .field("timeout_secs", timeout_secs)
                .field("temperature", temperature)
                .finish(),
        }
    }
}

impl LlmConfig {
    /// Parses a `provider:model` spec such as `gemini:gemini-2.0-flash`.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::InvalidModelSpec`] for an unknown provider or an
    /// empty model name.
    pub fn from_spec(spec: &str) -> Result<Self, LlmError> {
        let invalid = || LlmError::InvalidModelSpec(spec.to_string());
        let (provider, model) = spec.trim().split_once(':').ok_or_else(invalid)?;
        if model.is_empty() {
            return Err(invalid());
        }
        let model = model.to_string();
        match provider {
            "openai" => Ok(Self::OpenAi {
                model,
                api_key: None,
                base_url: None,
                timeout_secs: None,
                temperature: None,
            }),
            "openrouter" => Ok(Self::OpenRouter {
                model,
                api_key: None,
                http_referer: None,
                app_title: None,
                temperature: None,
            }),
            "anthropic" => Ok(Self::Anthropic {
                model,
                api_key: None,
                base_url: None,
                timeout_secs: None,
                temperature: None,
            }),
            "gemini" => Ok(Self::Gemini {
                model,
                api_key: None,
                base_url: None,
                timeout_secs: None,
                temperature: None,
            }),
            _ => Err(invalid()),
        }
    }

    /// Provider name as used in model specs.
    #[must_use]
    pub fn provider(&self) -> &'static str {
        match self {
            Self::OpenAi { .. } => "openai",
            Self::OpenRouter { .. } => "openrouter",
            Self::Anthropic { .. } => "anthropic",
            Self::Gemini { .. } => "gemini",
        }
    }

    /// Model name.
    #[must_use]
    pub fn model(&self) -> &str {
        match self {
            Self::OpenAi { model, .. }
            | Self::OpenRouter { model, .. }
            | Self::Anthropic { model, .. }
            | Self::Gemini { model, .. } => model,
        }
    }

    /// Configured temperature, if any.
    #[must_use]
    pub fn temperature(&self) -> Option<f64> {
        match self {
            Self::OpenAi { temperature, .. }
            | Self::OpenRouter { temperature, .. }
            | Self::Anthropic { temperature, .. }
            | Self::Gemini { temperature, .. } => *temperature,
        }
    }

    /// Request timeout in seconds, for providers that accept one.
    #[must_use]
    pub fn timeout_secs(&self) -> Option<u64> {
        match self {
            Self::OpenAi { timeout_secs, .. }
            | Self::Anthropic { timeout_secs, .. }
            | Self::Gemini { timeout_secs, .. } => *timeout_secs,
            Self::OpenRouter { .. } => None,
        }
    }

    /// Builds a model from the configuration.
    ///
    /// The API key is resolved first so a missing credential is reported as
    /// [`LlmError::MissingCredential`] instead of a provider error.
    pub(crate) fn build_model(&self) -> Result<Arc<dyn Model>, LlmError> {
        match self {
            Self::OpenRouter {
                model,
                api_key,
                http_referer,
                app_title,
                ..
            } => {
                let key = resolve_api_key(self.provider(), api_key.as_deref())?;
                let mut model = OpenRouterModel::new(model, &key);
                if let Some(referer) = http_referer {
                    model = model.with_http_referer(referer);
                }
                if let Some(title) = app_title {
                    model = model.with_app_title(title);
                }
                Ok(Arc::new(model))
            }
            Self::OpenAi {
                model,
                api_key,
                base_url,
                timeout_secs,
                ..
            }
            | Self::Anthropic {
                model,
                api_key,
                base_url,
                timeout_secs,
                ..
            }
            | Self::Gemini {
                model,
                api_key,
                base_url,
                timeout_secs,
                ..
            } => build_configured_model(self.provider(), model, api_key, base_url, timeout_secs),
        }
    }
}

/// Builds a configured model for generic providers.
fn build_configured_model(
    provider: &'static str,
    model: &str,
    api_key: &Option<String>,
    base_url: &Option<String>,
    timeout_secs: &Option<u64>,
) -> Result<Arc<dyn Model>, LlmError> {
    let key = resolve_api_key(provider, api_key.as_deref())?;
    let timeout = timeout_secs.map(core::time::Duration::from_secs);
    build_model_with_config(
        provider,
        model,
        Some(key.as_str()),
        base_url.as_deref(),
        timeout,
    )
    .map_err(LlmError::Model)
}

/// Resolves the API key from config, then from the provider's env vars.
pub(crate) fn resolve_api_key(
    provider: &'static str,
    configured: Option<&str>,
) -> Result<String, LlmError> {
    if let Some(key) = configured.filter(|key| !key.trim().is_empty()) {
        return Ok(key.to_string());
    }
    let vars = CREDENTIAL_ENV
        .iter()
        .find(|(name, _)| *name == provider)
        .map_or(&[][..], |(_, vars)| *vars);
    vars.iter()
        .find_map(|var| std::env::var(var).ok().filter(|key| !key.trim().is_empty()))
        .ok_or(LlmError::MissingCredential {
            provider,
            env_var: vars.first().copied().unwrap_or("an API key variable"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_model_specs() {
        let config = LlmConfig::from_spec("gemini:gemini-2.0-flash").unwrap();
        assert_eq!(config.provider(), "gemini");
        assert_eq!(config.model(), "gemini-2.0-flash");
        assert_eq!(config.temperature(), None);

        let config = LlmConfig::from_spec("openrouter:anthropic/claude-3-opus").unwrap();
        assert_eq!(config.provider(), "openrouter");
        assert_eq!(config.model(), "anthropic/claude-3-opus");
    }

    #[test]
    fn rejects_invalid_model_specs() {
        for spec in ["gpt-4o", "cohere:command", "openai:", ""] {
            assert!(
                matches!(
                    LlmConfig::from_spec(spec),
                    Err(LlmError::InvalidModelSpec(_))
                ),
                "spec: {spec}"
            );
        }
    }

    #[test]
    fn configured_key_wins() {
        temp_env::with_var("OPENAI_API_KEY", Some("from-env"), || {
            assert_eq!(
                resolve_api_key("openai", Some("from-config")).unwrap(),
                "from-config"
            );
        });
    }

    #[test]
    fn falls_back_to_provider_env_vars() {
        temp_env::with_vars(
            [
                ("GOOGLE_API_KEY", None),
                ("GOOGLE_GENERATIVE_AI_API_KEY", Some("gemini-key")),
            ],
            || {
                assert_eq!(resolve_api_key("gemini", None).unwrap(), "gemini-key");
            },
        );
    }

    #[test]
    fn reports_missing_credentials() {
        temp_env::with_var_unset("ANTHROPIC_API_KEY", || {
            let error = resolve_api_key("anthropic", Some("  ")).unwrap_err();
            assert!(matches!(
                error,
                LlmError::MissingCredential {
                    provider: "anthropic",
                    env_var: "ANTHROPIC_API_KEY"
                }
            ));
            assert!(error.is_configuration());
        });
    }

    #[test]
    fn debug_output_redacts_api_keys() {
        let configs = [
            LlmConfig::OpenAi {
                model: "gpt-4o".to_string(),
                api_key: Some("sk-secret".to_string()),
                base_url: None,
                timeout_secs: None,
                temperature: None,
            },
            LlmConfig::OpenRouter {
                model: "meta/llama".to_string(),
                api_key: Some("sk-secret".to_string()),
                http_referer: None,
                app_title: None,
                temperature: None,
            },
        ];
        for config in configs {
            let rendered = format!("{config:?}");
            assert!(!rendered.contains("sk-secret"), "{rendered}");
            assert!(rendered.contains("<redacted>"));
            assert!(rendered.contains(config.model()));
        }
    }

    #[test]
    fn build_model_fails_fast_without_credentials() {
        temp_env::with_var_unset("OPENROUTER_API_KEY", || {
            let config = LlmConfig::from_spec("openrouter:meta/llama").unwrap();
            assert!(matches!(
                config.build_model(),
                Err(LlmError::MissingCredential { .. })
            ));
        });
    }
}
