// ABOUTME: HTTP request handlers for the oversight dashboard
// ABOUTME: Exposes budget realization and at-risk program overviews

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
};
use chrono::Utc;
use tracing::info;

use crate::response::{ApiError, ApiResponse};
use crate::state::AppState;

/// Get budget versus realization totals per category
pub async fn budget_analysis(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    info!("Building budget analysis overview");

    let overview = state.finance.budget_analysis().await?;
    Ok((StatusCode::OK, ResponseJson(ApiResponse::success(overview))))
}

/// Get running programs with stale reporting
pub async fn at_risk_programs(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Classifying at-risk programs");

    let overview = state.risk.at_risk_programs(Utc::now()).await?;
    Ok((StatusCode::OK, ResponseJson(ApiResponse::success(overview))))
}
