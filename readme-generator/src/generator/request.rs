//! Generation request body.

use crate::summary::SummaryFields;
use serde::Deserialize;

/// Body of a generation request.
///
/// The summary is accepted leniently; missing fields are checked by
/// [`Generator::generate`](super::Generator::generate) rather than rejected
/// during deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Repository summary, usually the output of an analysis.
    #[serde(default)]
    pub summary: SummaryFields,

    /// Free text appended to the prompt.
    #[serde(default, alias = "customPromptAddition")]
    pub additional_instructions: Option<String>,
}

impl GenerationRequest {
    /// Additional instructions, ignoring blank text.
    #[must_use]
    pub fn instructions(&self) -> Option<&str> {
        self.additional_instructions
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_instruction_keys() {
        let request: GenerationRequest = serde_json::from_str(
            r#"{"summary":{"name":"widget","owner":"acme"},"additionalInstructions":"Be brief."}"#,
        )
        .unwrap();
        assert_eq!(request.instructions(), Some("Be brief."));

        let request: GenerationRequest = serde_json::from_str(
            r#"{"summary":{"name":"widget","owner":"acme"},"customPromptAddition":"Use emoji."}"#,
        )
        .unwrap();
        assert_eq!(request.instructions(), Some("Use emoji."));
    }

    #[test]
    fn blank_instructions_are_ignored() {
        let request: GenerationRequest =
            serde_json::from_str(r#"{"summary":{},"additionalInstructions":"   "}"#).unwrap();
        assert_eq!(request.instructions(), None);
    }

    #[test]
    fn missing_summary_deserializes_to_empty_fields() {
        let request: GenerationRequest = serde_json::from_str("{}").unwrap();
        assert!(request.summary.into_summary().is_none());
    }
}
