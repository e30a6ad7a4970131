//! Repository analysis.
//!
//! Resolves a repository URL, reads metadata, the root listing and a fixed
//! checklist of well-known files, and assembles a [`RepositorySummary`].
//! Only the fetches the failure-policy table marks as
//! [`Abort`](FailurePolicy::Abort) can fail the analysis; every other failure
//! leaves its field absent.

mod checklist;
mod error;
mod policy;
mod repository_ref;

pub use checklist::{select_files, ChecklistEntry, ChecklistMatch, ChecklistSlot, CHECKLIST};
pub use error::{AnalyzeError, InvalidUrl};
pub use policy::{FailurePolicies, FailurePolicy, FetchCall, DEFAULT_FAILURE_POLICIES};
pub use repository_ref::RepositoryRef;

use crate::source::{decode_content, FetchError, RepositorySource};
use crate::summary::RepositorySummary;
use futures::future::{join, join_all};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, info_span, warn, Instrument};

/// Builds repository summaries from a [`RepositorySource`].
#[derive(Clone)]
pub struct Analyzer {
    source: Arc<dyn RepositorySource>,
    policies: FailurePolicies,
}

impl Analyzer {
    /// Creates an analyzer using [`DEFAULT_FAILURE_POLICIES`].
    #[must_use]
    pub fn new(source: Arc<dyn RepositorySource>) -> Self {
        Self {
            source,
            policies: DEFAULT_FAILURE_POLICIES,
        }
    }

    /// Sets whether a failed directory listing aborts the analysis.
    #[must_use]
    pub fn with_listing_policy(mut self, policy: FailurePolicy) -> Self {
        self.policies = self.policies.with_listing(policy);
        self
    }

    /// Analyzes the repository behind `repository_url`.
    ///
    /// The URL is validated before any network call. Metadata and the listing
    /// are read in sequence; checklist files and the license are then fetched
    /// concurrently.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzeError::InvalidInput`] for a malformed URL,
    /// [`AnalyzeError::NotFound`] if the repository does not exist, and
    /// [`AnalyzeError::UpstreamUnavailable`] if an aborting fetch fails.
    pub async fn analyze(&self, repository_url: &str) -> Result<RepositorySummary, AnalyzeError> {
        let repository = RepositoryRef::parse(repository_url)?;
        let span = info_span!(
            "analyze",
            owner = %repository.owner(),
            repo = %repository.name()
        );

        self.analyze_resolved(repository, repository_url.trim())
            .instrument(span)
            .await
    }

    async fn analyze_resolved(
        &self,
        repository: RepositoryRef,
        source_url: &str,
    ) -> Result<RepositorySummary, AnalyzeError> {
        info!("Starting repository analysis");

        let metadata = self
            .settle(
                FetchCall::Metadata,
                &repository,
                self.source.repository(&repository).await,
            )?
            .ok_or_else(|| {
                AnalyzeError::from_fetch(
                    FetchCall::Metadata,
                    &repository.to_string(),
                    FetchError::Transport("repository metadata unavailable".to_string()),
                )
            })?;
        let branch = metadata.default_branch.as_deref();

        let listing = self
            .settle(
                FetchCall::Listing,
                &repository,
                self.source.root_listing(&repository, branch).await,
            )?
            .unwrap_or_default();
        let file_names: BTreeSet<String> = listing
            .into_iter()
            .filter(|entry| entry.is_file())
            .map(|entry| entry.name)
            .collect();
        debug!(files = file_names.len(), "Read root listing");

        let selected = select_files(&file_names);
        let file_fetches = selected.iter().map(|matched| {
            let repository = &repository;
            async move {
                let result = self
                    .source
                    .file(repository, matched.file_name, branch)
                    .await
                    .and_then(|content| decode_content(&content));
                (matched, result)
            }
        });

        let license = metadata.license.clone().unwrap_or_default();
        let license_fetch = async {
            if !license.has_content_reference() {
                return None;
            }
            let result = self
                .source
                .license(&repository)
                .await
                .and_then(|content| decode_content(&content));
            Some(result)
        };

        let (files, license_result) = join(join_all(file_fetches), license_fetch).await;

        let mut summary = RepositorySummary {
            name: metadata.name,
            owner: metadata.owner.login,
            description: metadata.description,
            topics: metadata.topics.unwrap_or_default(),
            primary_language: metadata.language,
            file_names,
            readme_content: None,
            manifest_file: None,
            manifest_content: None,
            dependency_list_file: None,
            dependency_list_content: None,
            license_identifier: license.identifier(),
            license_text: None,
            default_branch: metadata.default_branch,
            source_url: source_url.to_string(),
        };

        for (matched, result) in files {
            let Some(content) = self.settle(FetchCall::FileContent, &repository, result)? else {
                continue;
            };
            let file_name = Some(matched.file_name.to_string());
            match matched.slot {
                ChecklistSlot::Readme => summary.readme_content = Some(content),
                ChecklistSlot::Manifest => {
                    summary.manifest_file = file_name;
                    summary.manifest_content = Some(content);
                }
                ChecklistSlot::DependencyList => {
                    summary.dependency_list_file = file_name;
                    summary.dependency_list_content = Some(content);
                }
            }
        }

        if let Some(result) = license_result {
            summary.license_text = self.settle(FetchCall::LicenseContent, &repository, result)?;
        }

        info!(
            readme = summary.readme_content.is_some(),
            manifest = summary.manifest_content.is_some(),
            dependency_list = summary.dependency_list_content.is_some(),
            license = summary.license_identifier.is_some(),
            "Analysis complete"
        );
        Ok(summary)
    }

    /// Applies the failure policy for `call` to a fetch result.
    fn settle<T>(
        &self,
        call: FetchCall,
        repository: &RepositoryRef,
        result: Result<T, FetchError>,
    ) -> Result<Option<T>, AnalyzeError> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(error) => match self.policies.policy_for(call) {
                FailurePolicy::Abort => Err(AnalyzeError::from_fetch(
                    call,
                    &repository.to_string(),
                    error,
                )),
                FailurePolicy::Degrade => {
                    warn!(call = call.as_str(), error = %error, "Fetch failed, leaving field absent");
                    Ok(None)
                }
            },
        }
    }
}
