// ABOUTME: Program type definitions
// ABOUTME: Structures for activated programs and their reporting activity

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::proposals::Pillar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgramStatus {
    Running,
    Completed,
    Halted,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: String,
    pub proposal_id: String,
    pub title: String,
    pub category: Pillar,
    pub location: String,
    pub final_budget: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub responsible_user_id: String,
    pub status: ProgramStatus,
    pub created_at: DateTime<Utc>,
}

/// A program together with the timestamp of its most recent progress report,
/// if any has ever been filed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramActivity {
    #[serde(flatten)]
    pub program: Program,
    pub last_report_at: Option<DateTime<Utc>>,
}

/// Terms fixed at activation time; everything else is copied from the proposal.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalTerms {
    pub final_budget: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub responsible_user_id: String,
}
