//! Service configuration loading.
//!
//! Settings come from a `config.toml` with `[server]`, `[github]`,
//! `[generation]` and `[llm]` sections. Every section is optional; a missing
//! file yields the defaults.

mod error;

pub use error::ConfigError;

use crate::llm::LlmConfig;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use tracing::{debug, info};

/// Top-level structure for `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ServiceConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// GitHub API settings.
    #[serde(default)]
    pub github: GitHubConfig,

    /// Document generation limits.
    #[serde(default)]
    pub generation: GenerationConfig,

    /// LLM provider configuration. Falls back to
    /// `README_GENERATOR_LLM_MODEL` when absent.
    pub llm: Option<LlmConfig>,
}

/// `[server]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ServerConfig {
    /// Address to listen on.
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// `[github]` section.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GitHubConfig {
    /// Personal access token. Raises the API rate limit when set.
    pub token: Option<String>,

    /// Base URL of the GitHub REST API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_github_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_base_url: default_api_base_url(),
            timeout_secs: default_github_timeout_secs(),
        }
    }
}

// Keeps the token out of logs.
impl std::fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// `[generation]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GenerationConfig {
    /// Output token limit passed to the backend.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u64,

    /// Maximum characters of each file excerpt placed in the prompt.
    #[serde(default = "default_max_excerpt_chars")]
    pub max_excerpt_chars: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_output_tokens: default_max_output_tokens(),
            max_excerpt_chars: default_max_excerpt_chars(),
        }
    }
}

pub(crate) fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

pub(crate) fn default_api_base_url() -> String {
    "https://api.github.com".to_string()
}

pub(crate) fn default_github_timeout_secs() -> u64 {
    10
}

pub(crate) fn default_max_output_tokens() -> u64 {
    4096
}

pub(crate) fn default_max_excerpt_chars() -> usize {
    8000
}

impl ServiceConfig {
    /// Checks values that deserialize fine but cannot work.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] naming the first bad setting.
    pub fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let invalid = |message: &str| ConfigError::ValidationError {
            path: path.display().to_string(),
            message: message.to_string(),
        };

        if self.server.bind.parse::<SocketAddr>().is_err() {
            return Err(invalid("server.bind must be a socket address such as 127.0.0.1:3000"));
        }
        if url::Url::parse(&self.github.api_base_url).is_err() {
            return Err(invalid("github.api-base-url must be an absolute URL"));
        }
        if self.github.timeout_secs == 0 {
            return Err(invalid("github.timeout-secs must be greater than zero"));
        }
        if self.llm.as_ref().and_then(LlmConfig::timeout_secs) == Some(0) {
            return Err(invalid("llm.timeout-secs must be greater than zero"));
        }
        if self.generation.max_output_tokens == 0 {
            return Err(invalid("generation.max-output-tokens must be greater than zero"));
        }
        if self.generation.max_excerpt_chars == 0 {
            return Err(invalid("generation.max-excerpt-chars must be greater than zero"));
        }
        Ok(())
    }
}

/// Loads and validates `config.toml`.
///
/// # Arguments
///
/// * `path` - Path to the config file
///
/// # Returns
///
/// The parsed configuration, or the defaults if the file does not exist.
///
/// # Errors
///
/// Returns an error if the file can't be read, isn't valid TOML, or fails
/// validation.
pub fn load_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    if !path.exists() {
        info!(path = %path.display(), "Config file not found, using defaults");
        return Ok(ServiceConfig::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
        path: path.display().to_string(),
        source,
    })?;
    let config: ServiceConfig =
        toml::from_str(&contents).map_err(|source| ConfigError::TomlError {
            path: path.display().to_string(),
            source,
        })?;
    config.validate(path)?;

    debug!(path = %path.display(), ?config, "Loaded config");
    Ok(config)
}
