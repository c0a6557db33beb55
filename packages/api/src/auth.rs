// ABOUTME: Authentication context for API requests
// ABOUTME: Resolves the x-user-id header to a stored user and their role

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::response::ApiError;
use crate::state::AppState;
use peduli_oversight::{OversightError, Requester};

/// Current authenticated user
///
/// Identity arrives as a trusted `x-user-id` header set by the deployment's
/// front proxy; a missing header or an id with no stored user is rejected
/// before the handler runs.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Requester);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .ok_or(ApiError(OversightError::AuthenticationRequired))?;

        let user = state
            .db
            .user_storage
            .get_user(user_id)
            .await
            .map_err(ApiError::from)?
            .ok_or(ApiError(OversightError::AuthenticationRequired))?;

        Ok(CurrentUser(Requester::new(user.id, user.role)))
    }
}
