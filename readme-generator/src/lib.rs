#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod analyzer;
pub mod config;
pub mod generator;
pub mod http;
pub mod llm;
pub mod prompt;
pub mod source;
pub mod summary;

pub use analyzer::{AnalyzeError, Analyzer, FailurePolicy, InvalidUrl, RepositoryRef};
pub use config::{
    load_config, ConfigError, GenerationConfig, GitHubConfig, ServerConfig, ServiceConfig,
};
pub use generator::{GenerateError, GenerationRequest, Generator};
pub use http::{router, serve, ApiError, AppState, StartupError};
pub use llm::{LlmConfig, LlmError, SerdesAiBackend, TextBackend};
pub use prompt::{PromptError, PromptRenderer};
pub use source::{FetchError, GitHubSource, RepositorySource};
pub use summary::{GeneratedDocument, RepositorySummary, SummaryFields};
