//! Octocrab-backed repository source.

use super::{DirectoryEntry, EncodedContent, FetchError, RepositoryMetadata, RepositorySource};
use crate::analyzer::RepositoryRef;
use crate::config::GitHubConfig;
use async_trait::async_trait;
use octocrab::Octocrab;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Reads repositories through the GitHub REST API.
///
/// Every call is bounded by the configured timeout and issued exactly once.
#[derive(Clone)]
pub struct GitHubSource {
    octocrab: Octocrab,
    timeout: Duration,
}

impl GitHubSource {
    /// Wraps an existing client.
    #[must_use]
    pub fn new(octocrab: Octocrab, timeout: Duration) -> Self {
        Self { octocrab, timeout }
    }

    /// Builds a client from configuration, authenticating when a token is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the client cannot be built.
    pub fn connect(config: &GitHubConfig) -> Result<Self, octocrab::Error> {
        let mut builder = Octocrab::builder().base_uri(config.api_base_url.clone())?;
        if let Some(token) = &config.token {
            builder = builder.personal_token(token.clone());
        }
        let octocrab = builder.build()?;
        Ok(Self::new(octocrab, Duration::from_secs(config.timeout_secs)))
    }

    /// Issues a GET within the timeout and deserializes the JSON body.
    async fn get_json<R>(&self, route: String) -> Result<R, FetchError>
    where
        R: DeserializeOwned,
    {
        debug!(route = %route, "GitHub request");
        match tokio::time::timeout(self.timeout, self.fetch_json(&route)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(self.timeout.as_secs())),
        }
    }

    /// Classifies on the HTTP status before reading the body, so a failure
    /// without a JSON error body still keeps its status.
    async fn fetch_json<R>(&self, route: &str) -> Result<R, FetchError>
    where
        R: DeserializeOwned,
    {
        let response = self.octocrab._get(route).await?;
        let status = response.status();
        if !status.is_success() {
            let body = self
                .octocrab
                .body_to_string(response)
                .await
                .unwrap_or_default();
            return Err(FetchError::from_status(status.as_u16(), &body));
        }
        let body = self.octocrab.body_to_string(response).await?;
        serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

/// Appends `?ref=<reference>` when a reference is given.
fn with_ref(route: String, reference: Option<&str>) -> String {
    match reference {
        Some(reference) => {
            let query = url::form_urlencoded::Serializer::new(String::new())
                .append_pair("ref", reference)
                .finish();
            format!("{route}?{query}")
        }
        None => route,
    }
}

#[async_trait]
impl RepositorySource for GitHubSource {
    async fn repository(
        &self,
        repository: &RepositoryRef,
    ) -> Result<RepositoryMetadata, FetchError> {
        self.get_json(repository.api_path()).await
    }

    async fn root_listing(
        &self,
        repository: &RepositoryRef,
        reference: Option<&str>,
    ) -> Result<Vec<DirectoryEntry>, FetchError> {
        let route = format!("{}/contents", repository.api_path());
        self.get_json(with_ref(route, reference)).await
    }

    async fn file(
        &self,
        repository: &RepositoryRef,
        path: &str,
        reference: Option<&str>,
    ) -> Result<EncodedContent, FetchError> {
        let route = format!("{}/contents/{path}", repository.api_path());
        self.get_json(with_ref(route, reference)).await
    }

    async fn license(&self, repository: &RepositoryRef) -> Result<EncodedContent, FetchError> {
        let route = format!("{}/license", repository.api_path());
        self.get_json(route).await
    }
}
