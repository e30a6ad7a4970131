//! Repository summary types.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

/// Normalized description of a repository, produced by the analyzer.
///
/// `name` and `owner` are always present; every other field is independently
/// optional and omitted from JSON when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySummary {
    /// Repository name.
    pub name: String,

    /// Account or organization login.
    pub owner: String,

    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Topic tags in the order the host returned them.
    #[serde(default)]
    pub topics: Vec<String>,

    /// Dominant language reported by the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_language: Option<String>,

    /// Names of the files at the repository root.
    #[serde(default)]
    pub file_names: BTreeSet<String>,

    /// Raw README content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readme_content: Option<String>,

    /// Name of the manifest file that was read (e.g., "Cargo.toml").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest_file: Option<String>,

    /// Raw manifest content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest_content: Option<String>,

    /// Name of the dependency-list file that was read (e.g., "requirements.txt").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency_list_file: Option<String>,

    /// Raw dependency-list content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency_list_content: Option<String>,

    /// SPDX identifier or license display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_identifier: Option<String>,

    /// Raw license text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_text: Option<String>,

    /// Default branch the listing was read from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,

    /// The URL the analysis was requested for.
    pub source_url: String,
}

/// Wire form of a summary as sent back by a client.
///
/// Every field is optional here, including `name` and `owner`; the generator
/// validates their presence before doing anything else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryFields {
    #[serde(default, alias = "repoName")]
    pub name: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub topics: Vec<String>,
    #[serde(default, alias = "mainLanguage")]
    pub primary_language: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub file_names: BTreeSet<String>,
    #[serde(default)]
    pub readme_content: Option<String>,
    #[serde(default)]
    pub manifest_file: Option<String>,
    #[serde(default, alias = "packageJsonContent")]
    pub manifest_content: Option<String>,
    #[serde(default)]
    pub dependency_list_file: Option<String>,
    #[serde(default, alias = "requirementsTxtContent")]
    pub dependency_list_content: Option<String>,
    #[serde(default, alias = "licenseType")]
    pub license_identifier: Option<String>,
    #[serde(default, alias = "licenseContent")]
    pub license_text: Option<String>,
    #[serde(default)]
    pub default_branch: Option<String>,
    #[serde(default, alias = "repoUrl")]
    pub source_url: Option<String>,
}

impl SummaryFields {
    /// Returns a summary if `name` and `owner` are present and not blank.
    #[must_use]
    pub fn into_summary(self) -> Option<RepositorySummary> {
        let name = self.name.filter(|name| !name.trim().is_empty())?;
        let owner = self.owner.filter(|owner| !owner.trim().is_empty())?;
        Some(RepositorySummary {
            name,
            owner,
            description: self.description,
            topics: self.topics,
            primary_language: self.primary_language,
            file_names: self.file_names,
            readme_content: self.readme_content,
            manifest_file: self.manifest_file,
            manifest_content: self.manifest_content,
            dependency_list_file: self.dependency_list_file,
            dependency_list_content: self.dependency_list_content,
            license_identifier: self.license_identifier,
            license_text: self.license_text,
            default_branch: self.default_branch,
            source_url: self.source_url.unwrap_or_default(),
        })
    }
}

impl From<RepositorySummary> for SummaryFields {
    fn from(summary: RepositorySummary) -> Self {
        Self {
            name: Some(summary.name),
            owner: Some(summary.owner),
            description: summary.description,
            topics: summary.topics,
            primary_language: summary.primary_language,
            file_names: summary.file_names,
            readme_content: summary.readme_content,
            manifest_file: summary.manifest_file,
            manifest_content: summary.manifest_content,
            dependency_list_file: summary.dependency_list_file,
            dependency_list_content: summary.dependency_list_content,
            license_identifier: summary.license_identifier,
            license_text: summary.license_text,
            default_branch: summary.default_branch,
            source_url: Some(summary.source_url),
        }
    }
}

/// Reads `null` the same way as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
