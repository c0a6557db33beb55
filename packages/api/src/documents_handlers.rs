// ABOUTME: HTTP request handlers for program document metadata
// ABOUTME: Stores references to externally hosted files, never file content

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
    Json,
};
use tracing::info;

use crate::auth::CurrentUser;
use crate::response::{ApiError, ApiResponse};
use crate::state::AppState;
use peduli_oversight::{can_access_program, OversightError};
use peduli_programs::DocumentCreateInput;

/// List a program's document metadata, newest first
pub async fn list_documents(
    State(state): State<AppState>,
    CurrentUser(requester): CurrentUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Listing documents for program: {}", id);

    let program = state
        .db
        .program_storage
        .get_program(&id)
        .await?
        .ok_or_else(|| OversightError::not_found("Program", &id))?;

    if !can_access_program(&requester, &program) {
        return Err(OversightError::AccessDenied.into());
    }

    let documents = state.db.document_storage.list_documents(&id).await?;

    Ok((
        StatusCode::OK,
        ResponseJson(ApiResponse::success(documents)),
    ))
}

/// Attach document metadata to a program
pub async fn create_document(
    State(state): State<AppState>,
    CurrentUser(requester): CurrentUser,
    Path(id): Path<String>,
    Json(input): Json<DocumentCreateInput>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Attaching document to program: {}", id);

    let program = state
        .db
        .program_storage
        .get_program(&id)
        .await?
        .ok_or_else(|| OversightError::not_found("Program", &id))?;

    if !can_access_program(&requester, &program) {
        return Err(OversightError::AccessDenied.into());
    }

    let document = state
        .db
        .document_storage
        .create_document(&id, &requester.user_id, input)
        .await?;

    Ok((
        StatusCode::CREATED,
        ResponseJson(ApiResponse::success(document)),
    ))
}
