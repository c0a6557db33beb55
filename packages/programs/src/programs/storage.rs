// ABOUTME: Program storage layer using SQLite
// ABOUTME: Handles program reads, status transitions, and reporting-activity joins

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use tracing::debug;

use super::types::{Program, ProgramActivity, ProgramStatus};
use peduli_storage::StorageError;

pub struct ProgramStorage {
    pool: SqlitePool,
}

impl ProgramStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get_program(&self, program_id: &str) -> Result<Option<Program>, StorageError> {
        debug!("Fetching program: {}", program_id);

        let row = sqlx::query("SELECT * FROM programs WHERE id = ?")
            .bind(program_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        row.map(|r| self.row_to_program(&r)).transpose()
    }

    pub async fn list_programs(&self) -> Result<Vec<Program>, StorageError> {
        let rows = sqlx::query("SELECT * FROM programs ORDER BY created_at DESC, id DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        rows.iter().map(|r| self.row_to_program(r)).collect()
    }

    pub async fn list_programs_by_responsible(
        &self,
        user_id: &str,
    ) -> Result<Vec<Program>, StorageError> {
        debug!("Fetching programs responsible to: {}", user_id);

        let rows = sqlx::query(
            "SELECT * FROM programs WHERE responsible_user_id = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        rows.iter().map(|r| self.row_to_program(r)).collect()
    }

    /// All programs in the given status, each joined with the timestamp of its
    /// latest progress report (NULL when none was ever filed).
    pub async fn list_with_last_report(
        &self,
        status: ProgramStatus,
    ) -> Result<Vec<ProgramActivity>, StorageError> {
        debug!("Fetching {:?} programs with last report times", status);

        let rows = sqlx::query(
            r#"
            SELECT
                p.*,
                (SELECT MAX(r.created_at)
                 FROM progress_reports r
                 WHERE r.program_id = p.id) AS last_report_at
            FROM programs p
            WHERE p.status = ?
            ORDER BY p.created_at, p.id
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        let mut activities = Vec::new();
        for row in rows {
            let program = self.row_to_program(&row)?;
            let last_report_at: Option<DateTime<Utc>> = row.try_get("last_report_at")?;
            activities.push(ProgramActivity {
                program,
                last_report_at,
            });
        }

        Ok(activities)
    }

    /// Guarded status transition: only flips when the row is still in `from`.
    /// Returns whether a row actually transitioned.
    pub async fn set_status_from(
        &self,
        program_id: &str,
        from: ProgramStatus,
        to: ProgramStatus,
    ) -> Result<bool, StorageError> {
        debug!("Transitioning program {}: {:?} -> {:?}", program_id, from, to);

        let result = sqlx::query("UPDATE programs SET status = ? WHERE id = ? AND status = ?")
            .bind(to)
            .bind(program_id)
            .bind(from)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(result.rows_affected() == 1)
    }

    fn row_to_program(&self, row: &sqlx::sqlite::SqliteRow) -> Result<Program, StorageError> {
        let raw_budget: String = row.try_get("final_budget")?;
        let final_budget = Decimal::from_str(&raw_budget).map_err(|e| {
            StorageError::Database(format!("invalid final_budget '{}': {}", raw_budget, e))
        })?;

        Ok(Program {
            id: row.try_get("id")?,
            proposal_id: row.try_get("proposal_id")?,
            title: row.try_get("title")?,
            category: row.try_get("category")?,
            location: row.try_get("location")?,
            final_budget,
            start_date: row.try_get("start_date")?,
            end_date: row.try_get("end_date")?,
            responsible_user_id: row.try_get("responsible_user_id")?,
            status: row.try_get("status")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
