// ABOUTME: Program document storage layer using SQLite
// ABOUTME: Handles document metadata creation and per-program listing

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::types::{DocumentCreateInput, ProgramDocument};
use peduli_storage::StorageError;

pub struct DocumentStorage {
    pool: SqlitePool,
}

impl DocumentStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_document(
        &self,
        program_id: &str,
        uploaded_by: &str,
        input: DocumentCreateInput,
    ) -> Result<ProgramDocument, StorageError> {
        let document_id = peduli_core::generate_id();
        let now = Utc::now();

        debug!(
            "Creating document: {} for program: {}",
            document_id, program_id
        );

        sqlx::query(
            r#"
            INSERT INTO program_documents (
                id, program_id, doc_kind, mime_type, content_ref, uploaded_by, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&document_id)
        .bind(program_id)
        .bind(&input.doc_kind)
        .bind(&input.mime_type)
        .bind(&input.content_ref)
        .bind(uploaded_by)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        Ok(ProgramDocument {
            id: document_id,
            program_id: program_id.to_string(),
            doc_kind: input.doc_kind,
            mime_type: input.mime_type,
            content_ref: input.content_ref,
            uploaded_by: uploaded_by.to_string(),
            created_at: now,
        })
    }

    pub async fn list_documents(
        &self,
        program_id: &str,
    ) -> Result<Vec<ProgramDocument>, StorageError> {
        debug!("Fetching documents for program: {}", program_id);

        let rows = sqlx::query(
            "SELECT * FROM program_documents WHERE program_id = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(program_id)
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        rows.iter().map(|r| self.row_to_document(r)).collect()
    }

    fn row_to_document(
        &self,
        row: &sqlx::sqlite::SqliteRow,
    ) -> Result<ProgramDocument, StorageError> {
        Ok(ProgramDocument {
            id: row.try_get("id")?,
            program_id: row.try_get("program_id")?,
            doc_kind: row.try_get("doc_kind")?,
            mime_type: row.try_get("mime_type")?,
            content_ref: row.try_get("content_ref")?,
            uploaded_by: row.try_get("uploaded_by")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
