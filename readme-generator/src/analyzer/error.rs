//! Analyzer error types.

use super::FetchCall;
use crate::source::FetchError;
use thiserror::Error;

/// Status forwarded when the host failed without reporting a usable status.
const BAD_GATEWAY: u16 = 502;

/// Status forwarded when the host did not answer in time.
const GATEWAY_TIMEOUT: u16 = 504;

/// Reasons a repository URL is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidUrl {
    /// No URL was supplied.
    #[error("no URL supplied")]
    Missing,

    /// The string is not a URL.
    #[error("not a URL")]
    Unparseable,

    /// The scheme is neither http nor https.
    #[error("unsupported scheme")]
    UnsupportedScheme,

    /// The host is not github.com.
    #[error("unsupported host")]
    UnsupportedHost,

    /// The path lacks an owner or repository segment.
    #[error("missing owner or repository segment")]
    MissingSegments,

    /// The owner segment contains characters GitHub does not allow.
    #[error("invalid owner segment")]
    InvalidOwner,

    /// The repository segment contains characters GitHub does not allow.
    #[error("invalid repository segment")]
    InvalidName,
}

/// Hard failures that abort an analysis.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The repository URL is missing or malformed.
    #[error("Invalid repository URL: {0}")]
    InvalidInput(#[from] InvalidUrl),

    /// The repository does not exist or is not visible.
    #[error("Repository {full_name} not found")]
    NotFound { full_name: String },

    /// The host was reachable but refused or failed the request.
    #[error("GitHub unavailable for {full_name} (status {status}): {source}")]
    UpstreamUnavailable {
        full_name: String,
        status: u16,
        #[source]
        source: FetchError,
    },
}

impl AnalyzeError {
    /// Classifies a fetch error that the failure policy turned into an abort.
    ///
    /// Only a 404 on the metadata call means the repository is missing; a 404
    /// on a later call (an empty repository has no `/contents`) is forwarded
    /// as an upstream failure.
    #[must_use]
    pub fn from_fetch(call: FetchCall, full_name: &str, error: FetchError) -> Self {
        if call == FetchCall::Metadata && error.is_not_found() {
            return Self::NotFound {
                full_name: full_name.to_string(),
            };
        }
        let status = match &error {
            FetchError::Status { status, .. } => *status,
            FetchError::Timeout(_) => GATEWAY_TIMEOUT,
            FetchError::Transport(_) | FetchError::Decode(_) => BAD_GATEWAY,
        };
        Self::UpstreamUnavailable {
            full_name: full_name.to_string(),
            status,
            source: error,
        }
    }

    /// HTTP status the caller should receive.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::NotFound { .. } => 404,
            Self::UpstreamUnavailable { status, .. } if (400..=599).contains(status) => *status,
            Self::UpstreamUnavailable { .. } => BAD_GATEWAY,
        }
    }

    /// Stable, user-facing description of the failure.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidInput(InvalidUrl::Missing) => "Repository URL is required.",
            Self::InvalidInput(_) => {
                "Invalid GitHub URL. Please provide a repository URL such as https://github.com/owner/repo."
            }
            Self::NotFound { .. } => "Repository not found. Please check the URL.",
            Self::UpstreamUnavailable { .. } => {
                "Could not access the repository. It may be private, or the GitHub API rate limit may have been exceeded."
            }
        }
    }
}
