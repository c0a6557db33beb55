// ABOUTME: HTTP request handlers for user operations
// ABOUTME: Admin-managed account glue for the identity data behind reports

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
use peduli_oversight::OversightError;
use peduli_programs::UserCreateInput;

/// List all users (admin only)
pub async fn list_users(
    State(state): State<AppState>,
    CurrentUser(requester): CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    info!("Listing users");

    if !requester.is_admin() {
        return Err(OversightError::AccessDenied.into());
    }

    let users = state.db.user_storage.list_users().await?;

    Ok((StatusCode::OK, ResponseJson(ApiResponse::success(users))))
}

/// Create a user (admin only); the password hash is stored opaque
pub async fn create_user(
    State(state): State<AppState>,
    CurrentUser(requester): CurrentUser,
    Json(input): Json<UserCreateInput>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Creating user: {}", input.email);

    if !requester.is_admin() {
        return Err(OversightError::AccessDenied.into());
    }

    if let Some(existing) = state.db.user_storage.get_user_by_email(&input.email).await? {
        return Err(OversightError::ValidationFailure(format!(
            "email '{}' is already registered to user '{}'",
            input.email, existing.id
        ))
        .into());
    }

    let user = state.db.user_storage.create_user(input).await?;

    Ok((StatusCode::CREATED, ResponseJson(ApiResponse::success(user))))
}

/// Get a user by ID; visible to admins and the user themselves
pub async fn get_user(
    State(state): State<AppState>,
    CurrentUser(requester): CurrentUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Getting user: {}", id);

    if !requester.is_admin() && requester.user_id != id {
        return Err(OversightError::AccessDenied.into());
    }

    let user = state
        .db
        .user_storage
        .get_user(&id)
        .await?
        .ok_or_else(|| OversightError::not_found("User", &id))?;

    Ok((StatusCode::OK, ResponseJson(ApiResponse::success(user))))
}
