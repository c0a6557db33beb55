// ABOUTME: Proposal type definitions
// ABOUTME: Structures for program proposals, their status machine, and the CSR pillars

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// CSR pillar a proposal (and later its program) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Pillar {
    Education,
    Environment,
    Health,
    EconomicEmpowerment,
    Infrastructure,
    DisasterRelief,
}

impl Pillar {
    /// Stable wire name, used for deterministic ordering of aggregates.
    pub fn as_str(&self) -> &'static str {
        match self {
            Pillar::Education => "EDUCATION",
            Pillar::Environment => "ENVIRONMENT",
            Pillar::Health => "HEALTH",
            Pillar::EconomicEmpowerment => "ECONOMIC_EMPOWERMENT",
            Pillar::Infrastructure => "INFRASTRUCTURE",
            Pillar::DisasterRelief => "DISASTER_RELIEF",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProposalStatus {
    Submitted,
    Approved,
    Rejected,
    Activated,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramProposal {
    pub id: String,
    pub title: String,
    pub category: Pillar,
    pub location: String,
    pub background: Option<String>,
    pub objective: Option<String>,
    pub estimated_budget: Decimal,
    pub status: ProposalStatus,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalCreateInput {
    pub title: String,
    pub category: Pillar,
    pub location: String,
    pub background: Option<String>,
    pub objective: Option<String>,
    pub estimated_budget: Decimal,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalUpdateInput {
    pub title: Option<String>,
    pub category: Option<Pillar>,
    pub location: Option<String>,
    pub background: Option<String>,
    pub objective: Option<String>,
    pub estimated_budget: Option<Decimal>,
}
