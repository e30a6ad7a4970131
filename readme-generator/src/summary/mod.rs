//! Summary and document types exchanged between the analyzer and the generator.

mod generated_document;
mod repository_summary;

pub use generated_document::GeneratedDocument;
pub use repository_summary::{RepositorySummary, SummaryFields};
