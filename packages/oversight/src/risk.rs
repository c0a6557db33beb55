// ABOUTME: Staleness-based risk flagging for running programs
// ABOUTME: A program is at risk when nothing has been reported for over thirty days

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use peduli_programs::{ProgramActivity, ProgramStatus, ProgramStorage};

use crate::error::OversightResult;

/// How long a running program may go without a report before it is flagged.
pub const STALENESS_THRESHOLD_DAYS: i64 = 30;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtRiskOverview {
    pub programs: Vec<ProgramActivity>,
    /// The instant the classification was computed against.
    pub as_of: DateTime<Utc>,
    pub threshold_days: i64,
}

#[derive(Clone)]
pub struct RiskClassifier {
    program_storage: Arc<ProgramStorage>,
}

impl RiskClassifier {
    pub fn new(program_storage: Arc<ProgramStorage>) -> Self {
        Self { program_storage }
    }

    /// RUNNING programs whose reporting has gone quiet, judged against the
    /// caller-supplied `now`. Recomputed on every call; nothing is cached.
    pub async fn at_risk_programs(&self, now: DateTime<Utc>) -> OversightResult<AtRiskOverview> {
        let running = self
            .program_storage
            .list_with_last_report(ProgramStatus::Running)
            .await?;

        let programs: Vec<ProgramActivity> = running
            .into_iter()
            .filter(|activity| {
                is_at_risk(now, activity.last_report_at, activity.program.created_at)
            })
            .collect();

        debug!("Classified {} program(s) as at risk", programs.len());

        Ok(AtRiskOverview {
            programs,
            as_of: now,
            threshold_days: STALENESS_THRESHOLD_DAYS,
        })
    }
}

/// Strictly more than the threshold counts as at risk; exactly the threshold
/// does not. A program that has never reported is anchored at its creation.
pub fn is_at_risk(
    now: DateTime<Utc>,
    last_report_at: Option<DateTime<Utc>>,
    program_created_at: DateTime<Utc>,
) -> bool {
    let anchor = last_report_at.unwrap_or(program_created_at);
    now - anchor > Duration::days(STALENESS_THRESHOLD_DAYS)
}
