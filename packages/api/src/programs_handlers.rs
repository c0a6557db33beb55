// ABOUTME: HTTP request handlers for active program operations
// ABOUTME: Covers listing, detail access, and administrative close-out

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::auth::CurrentUser;
use crate::response::{ApiError, ApiResponse};
use crate::state::AppState;
use peduli_oversight::{can_access_program, CloseOutcome, OversightError};

/// List programs; admins see all, users see those they are responsible for
pub async fn list_programs(
    State(state): State<AppState>,
    CurrentUser(requester): CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    info!("Listing programs");

    let programs = if requester.is_admin() {
        state.db.program_storage.list_programs().await?
    } else {
        state
            .db
            .program_storage
            .list_programs_by_responsible(&requester.user_id)
            .await?
    };

    Ok((StatusCode::OK, ResponseJson(ApiResponse::success(programs))))
}

/// Get a program by ID; gated on responsibility or admin role
pub async fn get_program(
    State(state): State<AppState>,
    CurrentUser(requester): CurrentUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Getting program: {}", id);

    let program = state
        .db
        .program_storage
        .get_program(&id)
        .await?
        .ok_or_else(|| OversightError::not_found("Program", &id))?;

    if !can_access_program(&requester, &program) {
        return Err(OversightError::AccessDenied.into());
    }

    Ok((StatusCode::OK, ResponseJson(ApiResponse::success(program))))
}

/// Request body for closing a program
#[derive(Deserialize)]
pub struct ProgramStatusRequest {
    pub status: CloseOutcome,
}

/// Close a running program as COMPLETED or HALTED (admin only)
pub async fn update_program_status(
    State(state): State<AppState>,
    CurrentUser(requester): CurrentUser,
    Path(id): Path<String>,
    Json(request): Json<ProgramStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Closing program: {}", id);

    let program = state.lifecycle.close(&id, &requester, request.status).await?;

    Ok((StatusCode::OK, ResponseJson(ApiResponse::success(program))))
}
