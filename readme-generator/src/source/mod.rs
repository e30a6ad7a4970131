//! Access to the repository host.
//!
//! The analyzer only talks to the host through [`RepositorySource`], so the
//! octocrab-backed [`GitHubSource`] can be swapped for an in-memory source in
//! tests.

mod content;
mod error;
mod github;
mod models;

pub use content::decode_content;
pub use error::FetchError;
pub use github::GitHubSource;
pub use models::{
    DirectoryEntry, EncodedContent, LicenseDescriptor, RepositoryMetadata, RepositoryOwner,
};

use crate::analyzer::RepositoryRef;
use async_trait::async_trait;

/// The four reads the analyzer performs against the repository host.
#[async_trait]
pub trait RepositorySource: Send + Sync {
    /// Fetches repository metadata.
    async fn repository(&self, repository: &RepositoryRef)
        -> Result<RepositoryMetadata, FetchError>;

    /// Lists the top-level directory, at `reference` when one is given.
    async fn root_listing(
        &self,
        repository: &RepositoryRef,
        reference: Option<&str>,
    ) -> Result<Vec<DirectoryEntry>, FetchError>;

    /// Fetches a single top-level file.
    async fn file(
        &self,
        repository: &RepositoryRef,
        path: &str,
        reference: Option<&str>,
    ) -> Result<EncodedContent, FetchError>;

    /// Fetches the license file GitHub detected for the repository.
    async fn license(&self, repository: &RepositoryRef) -> Result<EncodedContent, FetchError>;
}
