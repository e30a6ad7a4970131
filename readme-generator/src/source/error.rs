//! Fetch error types.

use serde::Deserialize;
use thiserror::Error;

/// Errors produced by a single call against the repository host.
///
/// Whether a fetch error aborts an analysis or only blanks a field is decided
/// by the failure-policy table in [`crate::analyzer`], never here.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The host answered with a failure status.
    #[error("GitHub returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// The request never produced a usable response.
    #[error("GitHub request failed: {0}")]
    Transport(String),

    /// The request did not finish within the configured timeout.
    #[error("GitHub request timed out after {0} seconds")]
    Timeout(u64),

    /// The response arrived but its content could not be turned into text.
    #[error("Failed to decode file content: {0}")]
    Decode(String),
}

impl FetchError {
    /// Returns the status code reported by the host, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the host reported that the resource does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Error body GitHub sends with failure statuses.
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl FetchError {
    /// Builds a status error from a failed response, taking the message from
    /// a GitHub JSON error body when there is one.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|body| body.message)
            .ok()
            .or_else(|| Some(body.trim().to_string()).filter(|text| !text.is_empty()))
            .unwrap_or_else(|| format!("HTTP {status}"));
        Self::Status { status, message }
    }
}

impl From<octocrab::Error> for FetchError {
    fn from(error: octocrab::Error) -> Self {
        match error {
            octocrab::Error::GitHub { source, .. } => Self::Status {
                status: source.status_code.as_u16(),
                message: source.message,
            },
            other => Self::Transport(other.to_string()),
        }
    }
}
