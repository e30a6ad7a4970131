//! Response models for the GitHub REST endpoints the analyzer reads.

use serde::Deserialize;

/// SPDX id GitHub reports for licenses it cannot classify.
const NO_ASSERTION: &str = "NOASSERTION";

/// Repository metadata from `GET /repos/{owner}/{repo}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryMetadata {
    /// Repository name as reported by GitHub.
    pub name: String,

    /// Owning account.
    pub owner: RepositoryOwner,

    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,

    /// Dominant language detected by GitHub.
    #[serde(default)]
    pub language: Option<String>,

    /// Topic tags, in the order GitHub returns them.
    #[serde(default)]
    pub topics: Option<Vec<String>>,

    /// License descriptor, if GitHub detected one.
    #[serde(default)]
    pub license: Option<LicenseDescriptor>,

    /// Default branch name (e.g., "main").
    #[serde(default)]
    pub default_branch: Option<String>,
}

/// Account that owns a repository.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryOwner {
    /// Account or organization login.
    pub login: String,
}

/// License descriptor embedded in repository metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LicenseDescriptor {
    /// Short license key (e.g., "mit").
    #[serde(default)]
    pub key: Option<String>,

    /// Display name (e.g., "MIT License").
    #[serde(default)]
    pub name: Option<String>,

    /// SPDX identifier (e.g., "MIT").
    #[serde(default)]
    pub spdx_id: Option<String>,

    /// API reference for the license content.
    #[serde(default)]
    pub url: Option<String>,
}

impl LicenseDescriptor {
    /// Returns the SPDX id, falling back to the display name when GitHub
    /// could not classify the license.
    #[must_use]
    pub fn identifier(&self) -> Option<String> {
        self.spdx_id
            .as_deref()
            .filter(|id| !id.is_empty() && *id != NO_ASSERTION)
            .or(self.name.as_deref().filter(|name| !name.is_empty()))
            .map(str::to_owned)
    }

    /// Returns true if the descriptor points at retrievable license content.
    #[must_use]
    pub fn has_content_reference(&self) -> bool {
        self.url.as_deref().is_some_and(|url| !url.is_empty())
    }
}

/// One entry of a directory listing from `GET /repos/{owner}/{repo}/contents`.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryEntry {
    /// Entry name (not a full path).
    pub name: String,

    /// Entry kind: "file", "dir", "symlink" or "submodule".
    #[serde(rename = "type")]
    pub kind: String,
}

impl DirectoryEntry {
    /// Returns true for regular files.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.kind == "file"
    }
}

/// File content as delivered by the contents and license endpoints.
///
/// GitHub chooses the transport form; `encoding` tells which one arrived.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EncodedContent {
    /// Payload, possibly base64 with embedded line breaks.
    #[serde(default)]
    pub content: Option<String>,

    /// Transport encoding ("base64", "utf-8", "none"), absent for raw text.
    #[serde(default)]
    pub encoding: Option<String>,
}

impl EncodedContent {
    /// Wraps already-decoded text.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            encoding: None,
        }
    }

    /// Wraps a base64 payload.
    #[must_use]
    pub fn base64(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            encoding: Some("base64".to_string()),
        }
    }
}
