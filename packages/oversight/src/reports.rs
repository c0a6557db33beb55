// ABOUTME: Access-gated, paginated report listing for a single program
// ABOUTME: Existence is checked before authorization so 404 and 403 never leak into each other

use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use peduli_programs::{ProgramStorage, ReportFilter, ReportKind, ReportStorage, ReportWithAuthor};

use crate::access::{can_access_program, Requester};
use crate::error::{OversightError, OversightResult};
use crate::pagination::{PageMeta, PageParams};

/// Caller-facing query for a program's reports.
#[derive(Debug, Clone, Default)]
pub struct ReportQuery {
    pub page: PageParams,
    pub kind: Option<ReportKind>,
    /// Case-insensitive substring over the author's display name.
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPage {
    pub reports: Vec<ReportWithAuthor>,
    pub pagination: PageMeta,
}

#[derive(Clone)]
pub struct ReportQueryService {
    program_storage: Arc<ProgramStorage>,
    report_storage: Arc<ReportStorage>,
}

impl ReportQueryService {
    pub fn new(program_storage: Arc<ProgramStorage>, report_storage: Arc<ReportStorage>) -> Self {
        Self {
            program_storage,
            report_storage,
        }
    }

    /// One page of a program's reports, newest first.
    ///
    /// A missing program is NotFound even for requesters who could not have
    /// accessed it; a real program the requester may not see is AccessDenied
    /// with no counts or partial data attached.
    pub async fn list_program_reports(
        &self,
        program_id: &str,
        requester: &Requester,
        query: ReportQuery,
    ) -> OversightResult<ReportPage> {
        let program = self
            .program_storage
            .get_program(program_id)
            .await?
            .ok_or_else(|| OversightError::not_found("Program", program_id))?;

        if !can_access_program(requester, &program) {
            return Err(OversightError::AccessDenied);
        }

        let filter = ReportFilter {
            kind: query.kind,
            author_search: query.search,
        };

        debug!(
            "Listing reports for program: {} (page: {}, limit: {})",
            program_id,
            query.page.page(),
            query.page.limit()
        );

        // Count and slice are separate queries; a concurrent insert between
        // them can skew totalCount slightly. Accepted tradeoff.
        let total_count = self.report_storage.count_reports(program_id, &filter).await?;
        let reports = self
            .report_storage
            .list_reports(program_id, &filter, query.page.limit(), query.page.offset())
            .await?;

        Ok(ReportPage {
            reports,
            pagination: PageMeta::new(&query.page, total_count),
        })
    }
}
