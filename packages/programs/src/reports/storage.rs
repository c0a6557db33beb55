// ABOUTME: Progress report storage layer using SQLite
// ABOUTME: Handles report creation, filtered listing with author join, and aggregation feeds

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::types::{ProgressReport, ReportKind, ReportPayload, ReportWithAuthor};
use crate::proposals::Pillar;
use peduli_storage::StorageError;

/// Optional narrowing applied to both the count and the page fetch.
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub kind: Option<ReportKind>,
    /// Case-insensitive substring over the author's display name.
    /// LIKE wildcards in the term are treated literally.
    pub author_search: Option<String>,
}

pub struct ReportStorage {
    pool: SqlitePool,
}

impl ReportStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_report(
        &self,
        program_id: &str,
        author_id: &str,
        payload: &ReportPayload,
    ) -> Result<ProgressReport, StorageError> {
        let report_id = peduli_core::generate_id();
        let now = Utc::now();
        let kind = payload.kind();
        let payload_json = serde_json::to_string(payload)?;

        debug!(
            "Creating {:?} report: {} for program: {}",
            kind, report_id, program_id
        );

        sqlx::query(
            r#"
            INSERT INTO progress_reports (id, program_id, kind, payload, author_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&report_id)
        .bind(program_id)
        .bind(kind)
        .bind(&payload_json)
        .bind(author_id)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        Ok(ProgressReport {
            id: report_id,
            program_id: program_id.to_string(),
            kind,
            payload: serde_json::to_value(payload)?,
            author_id: author_id.to_string(),
            created_at: now,
        })
    }

    /// Total rows matching the filter, independent of pagination.
    pub async fn count_reports(
        &self,
        program_id: &str,
        filter: &ReportFilter,
    ) -> Result<i64, StorageError> {
        let mut sql = String::from(
            r#"
            SELECT COUNT(*)
            FROM progress_reports r
            JOIN users u ON u.id = r.author_id
            WHERE r.program_id = ?
            "#,
        );
        push_filter_conditions(&mut sql, filter);

        let mut db_query = sqlx::query_scalar(&sql).bind(program_id);
        if let Some(kind) = filter.kind {
            db_query = db_query.bind(kind);
        }
        if let Some(term) = &filter.author_search {
            db_query = db_query.bind(like_pattern(term));
        }

        let count: i64 = db_query
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(count)
    }

    /// One page of reports with author names. Newest first; ties broken by id
    /// so the order is stable across calls.
    pub async fn list_reports(
        &self,
        program_id: &str,
        filter: &ReportFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ReportWithAuthor>, StorageError> {
        debug!(
            "Fetching reports for program: {} (limit: {}, offset: {})",
            program_id, limit, offset
        );

        let mut sql = String::from(
            r#"
            SELECT
                r.id, r.program_id, r.kind, r.payload, r.author_id, r.created_at,
                u.name AS author_name
            FROM progress_reports r
            JOIN users u ON u.id = r.author_id
            WHERE r.program_id = ?
            "#,
        );
        push_filter_conditions(&mut sql, filter);
        sql.push_str(" ORDER BY r.created_at DESC, r.id DESC LIMIT ? OFFSET ?");

        // Bind parameters in the same order as conditions
        let mut db_query = sqlx::query(&sql).bind(program_id);
        if let Some(kind) = filter.kind {
            db_query = db_query.bind(kind);
        }
        if let Some(term) = &filter.author_search {
            db_query = db_query.bind(like_pattern(term));
        }
        db_query = db_query.bind(limit).bind(offset);

        let rows = db_query
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        let mut reports = Vec::new();
        for row in &rows {
            let report = self.row_to_report(row)?;
            let author_name: String = row.try_get("author_name")?;
            reports.push(ReportWithAuthor {
                report,
                author_name,
            });
        }

        Ok(reports)
    }

    /// Raw payload text of every FINANCIAL report, keyed by the owning
    /// program's category. Payloads are returned unparsed so the caller can
    /// decide how to treat malformed rows.
    pub async fn financial_payloads_by_category(
        &self,
    ) -> Result<Vec<(Pillar, String)>, StorageError> {
        let rows = sqlx::query(
            r#"
            SELECT p.category, r.payload
            FROM progress_reports r
            JOIN programs p ON p.id = r.program_id
            WHERE r.kind = ?
            "#,
        )
        .bind(ReportKind::Financial)
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        let mut payloads = Vec::new();
        for row in rows {
            let category: Pillar = row.try_get("category")?;
            let payload: String = row.try_get("payload")?;
            payloads.push((category, payload));
        }

        Ok(payloads)
    }

    fn row_to_report(&self, row: &sqlx::sqlite::SqliteRow) -> Result<ProgressReport, StorageError> {
        let raw_payload: String = row.try_get("payload")?;
        // Stored payloads were validated at creation; a row that fails to
        // parse is surfaced as JSON null rather than failing the whole page.
        let payload = serde_json::from_str(&raw_payload).unwrap_or(serde_json::Value::Null);

        Ok(ProgressReport {
            id: row.try_get("id")?,
            program_id: row.try_get("program_id")?,
            kind: row.try_get("kind")?,
            payload,
            author_id: row.try_get("author_id")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// Escape LIKE wildcards so a search term only ever matches literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn push_filter_conditions(sql: &mut String, filter: &ReportFilter) {
    if filter.kind.is_some() {
        sql.push_str(" AND r.kind = ?");
    }
    if filter.author_search.is_some() {
        sql.push_str(r#" AND LOWER(u.name) LIKE ? ESCAPE '\'"#);
    }
}

fn like_pattern(term: &str) -> String {
    format!("%{}%", escape_like(&term.to_lowercase()))
}
