//! Generated document type.

use serde::{Deserialize, Serialize};

/// Text produced by the generation backend, returned as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedDocument {
    /// Document text (Markdown).
    pub document: String,
}
