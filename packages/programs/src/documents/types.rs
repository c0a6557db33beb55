// ABOUTME: Program document type definitions
// ABOUTME: Metadata records pointing at externally stored file content

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramDocument {
    pub id: String,
    pub program_id: String,
    pub doc_kind: String,
    pub mime_type: String,
    /// Opaque pointer into whatever blob store holds the actual file.
    pub content_ref: String,
    pub uploaded_by: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentCreateInput {
    pub doc_kind: String,
    pub mime_type: String,
    pub content_ref: String,
}
