// ABOUTME: Proposal storage layer using SQLite
// ABOUTME: Handles proposal CRUD and the guarded status transitions of the review flow

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use tracing::debug;

use super::types::{ProgramProposal, ProposalCreateInput, ProposalStatus, ProposalUpdateInput};
use peduli_storage::StorageError;

pub struct ProposalStorage {
    pool: SqlitePool,
}

impl ProposalStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get_proposal(
        &self,
        proposal_id: &str,
    ) -> Result<Option<ProgramProposal>, StorageError> {
        debug!("Fetching proposal: {}", proposal_id);

        let row = sqlx::query("SELECT * FROM program_proposals WHERE id = ?")
            .bind(proposal_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        row.map(|r| self.row_to_proposal(&r)).transpose()
    }

    pub async fn list_proposals(&self) -> Result<Vec<ProgramProposal>, StorageError> {
        let rows = sqlx::query("SELECT * FROM program_proposals ORDER BY created_at DESC, id DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        rows.iter().map(|r| self.row_to_proposal(r)).collect()
    }

    pub async fn list_proposals_by_creator(
        &self,
        user_id: &str,
    ) -> Result<Vec<ProgramProposal>, StorageError> {
        debug!("Fetching proposals created by: {}", user_id);

        let rows = sqlx::query(
            "SELECT * FROM program_proposals WHERE created_by = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        rows.iter().map(|r| self.row_to_proposal(r)).collect()
    }

    pub async fn create_proposal(
        &self,
        created_by: &str,
        input: ProposalCreateInput,
    ) -> Result<ProgramProposal, StorageError> {
        let proposal_id = peduli_core::generate_id();
        let now = Utc::now();

        debug!("Creating proposal: {} by user: {}", proposal_id, created_by);

        sqlx::query(
            r#"
            INSERT INTO program_proposals (
                id, title, category, location, background, objective,
                estimated_budget, status, created_by, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&proposal_id)
        .bind(&input.title)
        .bind(input.category)
        .bind(&input.location)
        .bind(&input.background)
        .bind(&input.objective)
        .bind(input.estimated_budget.to_string())
        .bind(ProposalStatus::Submitted)
        .bind(created_by)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        Ok(ProgramProposal {
            id: proposal_id,
            title: input.title,
            category: input.category,
            location: input.location,
            background: input.background,
            objective: input.objective,
            estimated_budget: input.estimated_budget,
            status: ProposalStatus::Submitted,
            created_by: created_by.to_string(),
            created_at: now,
        })
    }

    pub async fn update_proposal(
        &self,
        proposal_id: &str,
        input: ProposalUpdateInput,
    ) -> Result<Option<ProgramProposal>, StorageError> {
        debug!("Updating proposal: {}", proposal_id);

        // Build dynamic UPDATE query based on provided fields
        let mut assignments = Vec::new();
        if input.title.is_some() {
            assignments.push("title = ?");
        }
        if input.category.is_some() {
            assignments.push("category = ?");
        }
        if input.location.is_some() {
            assignments.push("location = ?");
        }
        if input.background.is_some() {
            assignments.push("background = ?");
        }
        if input.objective.is_some() {
            assignments.push("objective = ?");
        }
        if input.estimated_budget.is_some() {
            assignments.push("estimated_budget = ?");
        }

        if assignments.is_empty() {
            return self.get_proposal(proposal_id).await;
        }

        let query = format!(
            "UPDATE program_proposals SET {} WHERE id = ?",
            assignments.join(", ")
        );

        let mut q = sqlx::query(&query);
        if let Some(title) = &input.title {
            q = q.bind(title);
        }
        if let Some(category) = input.category {
            q = q.bind(category);
        }
        if let Some(location) = &input.location {
            q = q.bind(location);
        }
        if let Some(background) = &input.background {
            q = q.bind(background);
        }
        if let Some(objective) = &input.objective {
            q = q.bind(objective);
        }
        if let Some(budget) = input.estimated_budget {
            q = q.bind(budget.to_string());
        }
        q = q.bind(proposal_id);

        q.execute(&self.pool).await.map_err(StorageError::Sqlx)?;

        self.get_proposal(proposal_id).await
    }

    /// Guarded status transition: only flips when the row is still in `from`.
    /// Returns whether a row actually transitioned.
    pub async fn set_status_from(
        &self,
        proposal_id: &str,
        from: ProposalStatus,
        to: ProposalStatus,
    ) -> Result<bool, StorageError> {
        debug!("Transitioning proposal {}: {:?} -> {:?}", proposal_id, from, to);

        let result = sqlx::query(
            "UPDATE program_proposals SET status = ? WHERE id = ? AND status = ?",
        )
        .bind(to)
        .bind(proposal_id)
        .bind(from)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        Ok(result.rows_affected() == 1)
    }

    fn row_to_proposal(&self, row: &sqlx::sqlite::SqliteRow) -> Result<ProgramProposal, StorageError> {
        let raw_budget: String = row.try_get("estimated_budget")?;
        let estimated_budget = Decimal::from_str(&raw_budget).map_err(|e| {
            StorageError::Database(format!("invalid estimated_budget '{}': {}", raw_budget, e))
        })?;

        Ok(ProgramProposal {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            category: row.try_get("category")?,
            location: row.try_get("location")?,
            background: row.try_get("background")?,
            objective: row.try_get("objective")?,
            estimated_budget,
            status: row.try_get("status")?,
            created_by: row.try_get("created_by")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
