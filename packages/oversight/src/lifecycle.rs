// ABOUTME: Proposal and program state machine with atomic activation
// ABOUTME: Activation creates the program and retires the proposal in one transaction

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{debug, info};

use peduli_programs::{
    FinalTerms, Program, ProgramProposal, ProgramStatus, ProgramStorage, ProposalStatus,
    ProposalStorage, UserStorage,
};

use crate::access::Requester;
use crate::error::{OversightError, OversightResult};

/// Outcome of an ADMIN review of a submitted proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewDecision {
    Approved,
    Rejected,
}

/// Terminal state an ADMIN moves a running program into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CloseOutcome {
    Completed,
    Halted,
}

#[derive(Clone)]
pub struct LifecycleCoordinator {
    pool: SqlitePool,
    proposal_storage: Arc<ProposalStorage>,
    program_storage: Arc<ProgramStorage>,
    user_storage: Arc<UserStorage>,
}

impl LifecycleCoordinator {
    pub fn new(
        pool: SqlitePool,
        proposal_storage: Arc<ProposalStorage>,
        program_storage: Arc<ProgramStorage>,
        user_storage: Arc<UserStorage>,
    ) -> Self {
        Self {
            pool,
            proposal_storage,
            program_storage,
            user_storage,
        }
    }

    /// ADMIN approves or rejects a submitted proposal.
    pub async fn review(
        &self,
        proposal_id: &str,
        requester: &Requester,
        decision: ReviewDecision,
    ) -> OversightResult<ProgramProposal> {
        if !requester.is_admin() {
            return Err(OversightError::AccessDenied);
        }

        let proposal = self
            .proposal_storage
            .get_proposal(proposal_id)
            .await?
            .ok_or_else(|| OversightError::not_found("Proposal", proposal_id))?;

        let target = match decision {
            ReviewDecision::Approved => ProposalStatus::Approved,
            ReviewDecision::Rejected => ProposalStatus::Rejected,
        };

        let flipped = self
            .proposal_storage
            .set_status_from(proposal_id, ProposalStatus::Submitted, target)
            .await?;

        if !flipped {
            return Err(OversightError::InvalidStateTransition(format!(
                "proposal '{}' is {:?}, only SUBMITTED proposals can be reviewed",
                proposal_id, proposal.status
            )));
        }

        info!("Proposal {} reviewed: {:?}", proposal_id, decision);

        self.proposal_storage
            .get_proposal(proposal_id)
            .await?
            .ok_or_else(|| OversightError::not_found("Proposal", proposal_id))
    }

    /// ADMIN turns an approved proposal into a running program.
    ///
    /// The program insert and the proposal status flip commit together or not
    /// at all; on any failure no orphan program row survives.
    pub async fn activate(
        &self,
        proposal_id: &str,
        requester: &Requester,
        terms: FinalTerms,
    ) -> OversightResult<Program> {
        if !requester.is_admin() {
            return Err(OversightError::AccessDenied);
        }

        let proposal = self
            .proposal_storage
            .get_proposal(proposal_id)
            .await?
            .ok_or_else(|| OversightError::not_found("Proposal", proposal_id))?;

        if proposal.status != ProposalStatus::Approved {
            return Err(OversightError::InvalidStateTransition(format!(
                "proposal '{}' is {:?}, only APPROVED proposals can be activated",
                proposal_id, proposal.status
            )));
        }

        self.validate_terms(&terms).await?;

        let program_id = peduli_core::generate_id();
        let now = Utc::now();

        debug!(
            "Activating proposal {} into program {}",
            proposal_id, program_id
        );

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| OversightError::TransactionFailed(e.to_string()))?;

        let insert = sqlx::query(
            r#"
            INSERT INTO programs (
                id, proposal_id, title, category, location, final_budget,
                start_date, end_date, responsible_user_id, status, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&program_id)
        .bind(proposal_id)
        .bind(&proposal.title)
        .bind(proposal.category)
        .bind(&proposal.location)
        .bind(terms.final_budget.to_string())
        .bind(terms.start_date)
        .bind(terms.end_date)
        .bind(&terms.responsible_user_id)
        .bind(ProgramStatus::Running)
        .bind(now)
        .execute(&mut *tx)
        .await;

        if let Err(e) = insert {
            let already_activated =
                matches!(&e, sqlx::Error::Database(db) if db.is_unique_violation());
            tx.rollback()
                .await
                .map_err(|e| OversightError::TransactionFailed(e.to_string()))?;
            return Err(if already_activated {
                OversightError::InvalidStateTransition(format!(
                    "proposal '{}' already has a program",
                    proposal_id
                ))
            } else {
                OversightError::TransactionFailed(e.to_string())
            });
        }

        // Guarded flip; loses gracefully if someone else got here first
        let updated = sqlx::query(
            "UPDATE program_proposals SET status = ? WHERE id = ? AND status = ?",
        )
        .bind(ProposalStatus::Activated)
        .bind(proposal_id)
        .bind(ProposalStatus::Approved)
        .execute(&mut *tx)
        .await
        .map_err(|e| OversightError::TransactionFailed(e.to_string()))?;

        if updated.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|e| OversightError::TransactionFailed(e.to_string()))?;
            return Err(OversightError::InvalidStateTransition(format!(
                "proposal '{}' left APPROVED while activation was in flight",
                proposal_id
            )));
        }

        tx.commit()
            .await
            .map_err(|e| OversightError::TransactionFailed(e.to_string()))?;

        info!(
            "Proposal {} activated into program {} with budget {}",
            proposal_id, program_id, terms.final_budget
        );

        Ok(Program {
            id: program_id,
            proposal_id: proposal_id.to_string(),
            title: proposal.title,
            category: proposal.category,
            location: proposal.location,
            final_budget: terms.final_budget,
            start_date: terms.start_date,
            end_date: terms.end_date,
            responsible_user_id: terms.responsible_user_id,
            status: ProgramStatus::Running,
            created_at: now,
        })
    }

    /// ADMIN marks a running program COMPLETED or HALTED.
    pub async fn close(
        &self,
        program_id: &str,
        requester: &Requester,
        outcome: CloseOutcome,
    ) -> OversightResult<Program> {
        if !requester.is_admin() {
            return Err(OversightError::AccessDenied);
        }

        let program = self
            .program_storage
            .get_program(program_id)
            .await?
            .ok_or_else(|| OversightError::not_found("Program", program_id))?;

        let target = match outcome {
            CloseOutcome::Completed => ProgramStatus::Completed,
            CloseOutcome::Halted => ProgramStatus::Halted,
        };

        let flipped = self
            .program_storage
            .set_status_from(program_id, ProgramStatus::Running, target)
            .await?;

        if !flipped {
            return Err(OversightError::InvalidStateTransition(format!(
                "program '{}' is {:?}, only RUNNING programs can be closed",
                program_id, program.status
            )));
        }

        info!("Program {} closed: {:?}", program_id, outcome);

        self.program_storage
            .get_program(program_id)
            .await?
            .ok_or_else(|| OversightError::not_found("Program", program_id))
    }

    async fn validate_terms(&self, terms: &FinalTerms) -> OversightResult<()> {
        if terms.final_budget <= Decimal::ZERO {
            return Err(OversightError::ValidationFailure(
                "final budget must be positive".to_string(),
            ));
        }

        if terms.start_date > terms.end_date {
            return Err(OversightError::ValidationFailure(format!(
                "start date {} is after end date {}",
                terms.start_date, terms.end_date
            )));
        }

        let responsible = self.user_storage.get_user(&terms.responsible_user_id).await?;
        if responsible.is_none() {
            return Err(OversightError::ValidationFailure(format!(
                "responsible user '{}' does not exist",
                terms.responsible_user_id
            )));
        }

        Ok(())
    }
}
