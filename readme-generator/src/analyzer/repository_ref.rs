//! Repository URL parsing.

use super::InvalidUrl;
use std::borrow::Cow;
use std::fmt;
use url::Url;

/// Hosts accepted as repository URLs.
const GITHUB_HOSTS: &[&str] = &["github.com", "www.github.com"];

/// Version-control suffix stripped from the repository segment.
const GIT_SUFFIX: &str = ".git";

/// An owner/repository pair resolved from a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    owner: String,
    name: String,
}

impl RepositoryRef {
    /// Resolves a repository URL such as `https://github.com/acme/widget.git`.
    ///
    /// Extra path segments (`/tree/main/src`), query strings and fragments are
    /// ignored. A URL without a scheme is read as https.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidUrl`] describing why the input was rejected.
    pub fn parse(input: &str) -> Result<Self, InvalidUrl> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(InvalidUrl::Missing);
        }

        let candidate = if trimmed.contains("://") {
            Cow::Borrowed(trimmed)
        } else {
            Cow::Owned(format!("https://{trimmed}"))
        };
        let url = Url::parse(&candidate).map_err(|_| InvalidUrl::Unparseable)?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(InvalidUrl::UnsupportedScheme);
        }
        match url.host_str() {
            Some(host) if GITHUB_HOSTS.contains(&host) => {}
            _ => return Err(InvalidUrl::UnsupportedHost),
        }

        let mut segments = url.path_segments().ok_or(InvalidUrl::MissingSegments)?;
        let owner = segments
            .next()
            .filter(|segment| !segment.is_empty())
            .ok_or(InvalidUrl::MissingSegments)?;
        let raw_name = segments
            .next()
            .filter(|segment| !segment.is_empty())
            .ok_or(InvalidUrl::MissingSegments)?;
        let name = raw_name.strip_suffix(GIT_SUFFIX).unwrap_or(raw_name);

        if !owner.chars().all(is_owner_char) {
            return Err(InvalidUrl::InvalidOwner);
        }
        if name.is_empty() || name == "." || name == ".." || !name.chars().all(is_name_char) {
            return Err(InvalidUrl::InvalidName);
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// Account or organization login.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name without any `.git` suffix.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical API route for this repository, e.g. `/repos/acme/widget`.
    #[must_use]
    pub fn api_path(&self) -> String {
        format!("/repos/{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

fn is_owner_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn is_name_char(c: char) -> bool {
    is_owner_char(c) || c == '.'
}
