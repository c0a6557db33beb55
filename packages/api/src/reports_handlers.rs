// ABOUTME: HTTP request handlers for progress report operations
// ABOUTME: Covers filing validated reports and the paginated report listing

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::auth::CurrentUser;
use crate::response::{ApiError, ApiResponse};
use crate::state::AppState;
use peduli_oversight::{
    can_access_program, OversightError, PageParams, ReportQuery, DEFAULT_PAGE_SIZE,
};
use peduli_programs::{ReportKind, ReportPayload};

/// Request body for filing a report
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportCreateRequest {
    pub kind: ReportKind,
    pub payload: serde_json::Value,
}

/// File a progress report against a program
///
/// The payload must match the declared kind; a financial report without a
/// usable amount is rejected here rather than skipped later.
pub async fn create_report(
    State(state): State<AppState>,
    CurrentUser(requester): CurrentUser,
    Path(id): Path<String>,
    Json(request): Json<ReportCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Filing {:?} report for program: {}", request.kind, id);

    let program = state
        .db
        .program_storage
        .get_program(&id)
        .await?
        .ok_or_else(|| OversightError::not_found("Program", &id))?;

    if !can_access_program(&requester, &program) {
        return Err(OversightError::AccessDenied.into());
    }

    let payload = ReportPayload::from_parts(request.kind, request.payload).map_err(|e| {
        OversightError::ValidationFailure(format!(
            "payload does not match report kind {:?}: {}",
            request.kind, e
        ))
    })?;

    let report = state
        .db
        .report_storage
        .create_report(&id, &requester.user_id, &payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        ResponseJson(ApiResponse::success(report)),
    ))
}

/// Query parameters for the report listing
#[derive(Debug, Deserialize)]
pub struct ReportListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub kind: Option<ReportKind>,
    pub search: Option<String>,
}

/// List a program's reports, newest first, paginated and filterable
pub async fn list_reports(
    State(state): State<AppState>,
    CurrentUser(requester): CurrentUser,
    Path(id): Path<String>,
    Query(params): Query<ReportListParams>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Listing reports for program: {}", id);

    let query = ReportQuery {
        page: PageParams::new(
            params.page.unwrap_or(1),
            params.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        ),
        kind: params.kind,
        search: params.search,
    };

    let page = state
        .reports
        .list_program_reports(&id, &requester, query)
        .await?;

    Ok((StatusCode::OK, ResponseJson(ApiResponse::success(page))))
}
