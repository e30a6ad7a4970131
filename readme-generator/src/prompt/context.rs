//! Data handed to the prompt template.

use crate::summary::RepositorySummary;
use serde::Serialize;

/// Number of optional signals a summary can carry.
const SIGNAL_COUNT: usize = 7;

/// Marker appended to excerpts that were cut.
const TRUNCATION_MARKER: &str = "\n[... truncated ...]";

/// Template variables derived from a summary.
///
/// Absent or blank fields become `None`, which the template treats as false,
/// so no label is ever emitted without data behind it.
#[derive(Debug, Serialize)]
pub(crate) struct PromptContext<'a> {
    name: &'a str,
    owner: &'a str,
    description: Option<&'a str>,
    topics: Option<String>,
    primary_language: Option<&'a str>,
    file_names: Option<String>,
    license_identifier: Option<&'a str>,
    readme_excerpt: Option<String>,
    manifest_file: &'a str,
    manifest_excerpt: Option<String>,
    dependency_list_file: &'a str,
    dependency_list_excerpt: Option<String>,
    license_excerpt: Option<String>,
    sparse: bool,
    has_license: bool,
    additional_instructions: Option<&'a str>,
}

impl<'a> PromptContext<'a> {
    pub(crate) fn new(
        summary: &'a RepositorySummary,
        additional_instructions: Option<&'a str>,
        max_excerpt_chars: usize,
    ) -> Self {
        let description = non_blank(&summary.description);
        let primary_language = non_blank(&summary.primary_language);
        let license_identifier = non_blank(&summary.license_identifier);
        let readme = non_blank(&summary.readme_content);
        let manifest = non_blank(&summary.manifest_content);
        let dependency_list = non_blank(&summary.dependency_list_content);
        let license_text = non_blank(&summary.license_text);
        let topics = join_non_blank(summary.topics.iter());
        let has_license = license_identifier.is_some() || license_text.is_some();

        let signals = [
            description.is_some(),
            topics.is_some(),
            primary_language.is_some(),
            readme.is_some(),
            manifest.is_some(),
            dependency_list.is_some(),
            has_license,
        ];
        debug_assert_eq!(signals.len(), SIGNAL_COUNT);
        let present = signals.iter().filter(|present| **present).count();

        Self {
            name: &summary.name,
            owner: &summary.owner,
            description,
            topics,
            primary_language,
            file_names: join_non_blank(summary.file_names.iter()),
            license_identifier,
            readme_excerpt: readme.map(|text| excerpt(text, max_excerpt_chars)),
            manifest_file: non_blank(&summary.manifest_file).unwrap_or("the package manifest"),
            manifest_excerpt: manifest.map(|text| excerpt(text, max_excerpt_chars)),
            dependency_list_file: non_blank(&summary.dependency_list_file)
                .unwrap_or("the dependency list"),
            dependency_list_excerpt: dependency_list.map(|text| excerpt(text, max_excerpt_chars)),
            license_excerpt: license_text.map(|text| excerpt(text, max_excerpt_chars)),
            sparse: present * 2 < SIGNAL_COUNT,
            has_license,
            additional_instructions: additional_instructions
                .filter(|text| !text.trim().is_empty()),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.trim().is_empty())
}

fn join_non_blank<'s>(items: impl Iterator<Item = &'s String>) -> Option<String> {
    let joined = items
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    (!joined.is_empty()).then_some(joined)
}

/// Cuts `text` to at most `max_chars` characters.
fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{TRUNCATION_MARKER}", &text[..cut]),
        None => text.to_string(),
    }
}
