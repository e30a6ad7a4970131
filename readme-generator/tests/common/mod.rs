//! In-memory repository host and generation backend shared by the
//! integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use readme_generator::source::{
    DirectoryEntry, EncodedContent, LicenseDescriptor, RepositoryMetadata, RepositoryOwner,
};
use readme_generator::{FetchError, LlmError, RepositoryRef, RepositorySource, TextBackend};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Serves canned responses and records every call it receives.
pub struct FakeSource {
    metadata: Result<RepositoryMetadata, FetchError>,
    listing: Result<Vec<DirectoryEntry>, FetchError>,
    files: HashMap<String, Result<EncodedContent, FetchError>>,
    license: Result<EncodedContent, FetchError>,
    calls: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new(metadata: RepositoryMetadata) -> Self {
        Self {
            metadata: Ok(metadata),
            listing: Ok(Vec::new()),
            files: HashMap::new(),
            license: Err(not_found()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_metadata(error: FetchError) -> Self {
        let mut source = Self::new(metadata("acme", "widget"));
        source.metadata = Err(error);
        source
    }

    /// Adds a directory to the listing.
    pub fn with_dir(mut self, name: &str) -> Self {
        if let Ok(listing) = &mut self.listing {
            listing.push(entry(name, "dir"));
        }
        self
    }

    /// Adds a file to the listing with readable content.
    pub fn with_file(mut self, name: &str, content: &str) -> Self {
        if let Ok(listing) = &mut self.listing {
            listing.push(entry(name, "file"));
        }
        self.files
            .insert(name.to_string(), Ok(EncodedContent::text(content)));
        self
    }

    /// Adds a file to the listing whose content fetch fails.
    pub fn with_broken_file(mut self, name: &str, error: FetchError) -> Self {
        if let Ok(listing) = &mut self.listing {
            listing.push(entry(name, "file"));
        }
        self.files.insert(name.to_string(), Err(error));
        self
    }

    pub fn with_listing_error(mut self, error: FetchError) -> Self {
        self.listing = Err(error);
        self
    }

    pub fn with_license_text(mut self, text: &str) -> Self {
        self.license = Ok(EncodedContent::text(text));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl RepositorySource for FakeSource {
    async fn repository(
        &self,
        repository: &RepositoryRef,
    ) -> Result<RepositoryMetadata, FetchError> {
        self.record(format!("repository {repository}"));
        self.metadata.clone()
    }

    async fn root_listing(
        &self,
        _repository: &RepositoryRef,
        reference: Option<&str>,
    ) -> Result<Vec<DirectoryEntry>, FetchError> {
        self.record(format!("listing {}", reference.unwrap_or("-")));
        self.listing.clone()
    }

    async fn file(
        &self,
        _repository: &RepositoryRef,
        path: &str,
        _reference: Option<&str>,
    ) -> Result<EncodedContent, FetchError> {
        self.record(format!("file {path}"));
        self.files.get(path).cloned().unwrap_or_else(|| Err(not_found()))
    }

    async fn license(&self, _repository: &RepositoryRef) -> Result<EncodedContent, FetchError> {
        self.record("license".to_string());
        self.license.clone()
    }
}

/// Counts calls and replies with fixed text.
pub struct FakeBackend {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextBackend for FakeBackend {
    async fn generate(&self, prompt: &str, _max_output_tokens: u64) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

pub fn metadata(owner: &str, name: &str) -> RepositoryMetadata {
    RepositoryMetadata {
        name: name.to_string(),
        owner: RepositoryOwner {
            login: owner.to_string(),
        },
        description: None,
        language: None,
        topics: None,
        license: None,
        default_branch: Some("main".to_string()),
    }
}

pub fn mit_license() -> LicenseDescriptor {
    LicenseDescriptor {
        key: Some("mit".to_string()),
        name: Some("MIT License".to_string()),
        spdx_id: Some("MIT".to_string()),
        url: Some("https://api.github.com/licenses/mit".to_string()),
    }
}

pub fn status(status: u16, message: &str) -> FetchError {
    FetchError::Status {
        status,
        message: message.to_string(),
    }
}

pub fn not_found() -> FetchError {
    status(404, "Not Found")
}

fn entry(name: &str, kind: &str) -> DirectoryEntry {
    DirectoryEntry {
        name: name.to_string(),
        kind: kind.to_string(),
    }
}
