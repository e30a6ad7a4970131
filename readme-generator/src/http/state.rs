//! Shared handler state.

use super::StartupError;
use crate::analyzer::Analyzer;
use crate::config::ServiceConfig;
use crate::generator::Generator;
use crate::llm::SerdesAiBackend;
use crate::source::GitHubSource;
use std::sync::Arc;
use tracing::{error, info};

/// State shared by all handlers. Holds no per-request data.
#[derive(Clone)]
pub struct AppState {
    analyzer: Arc<Analyzer>,
    generator: Arc<Generator>,
}

impl AppState {
    /// Creates state from already-built components.
    #[must_use]
    pub fn new(analyzer: Analyzer, generator: Generator) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            generator: Arc::new(generator),
        }
    }

    /// Builds the GitHub-backed analyzer and the serdes-ai generator.
    ///
    /// A generation backend that cannot be built (usually a missing API key)
    /// is logged and leaves generation unconfigured; analysis still works.
    ///
    /// # Errors
    ///
    /// Returns an error if the GitHub client cannot be built.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, StartupError> {
        let source = GitHubSource::connect(&config.github)?;
        let analyzer = Analyzer::new(Arc::new(source));

        let generator = match SerdesAiBackend::from_config(config.llm.as_ref()) {
            Ok(backend) => {
                info!("Generation backend ready");
                Generator::new(Arc::new(backend), config.generation)
            }
            Err(e) => {
                error!(error = %e, "Generation backend unavailable; /api/generate will fail");
                Generator::unconfigured(e.to_string(), config.generation)
            }
        };

        Ok(Self::new(analyzer, generator))
    }

    /// The repository analyzer.
    #[must_use]
    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    /// The document generator.
    #[must_use]
    pub fn generator(&self) -> &Generator {
        &self.generator
    }
}
