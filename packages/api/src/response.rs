// ABOUTME: Shared API response types and error handling
// ABOUTME: Provides consistent response format across all API endpoints

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
};
use serde::Serialize;
use tracing::error;

use peduli_oversight::OversightError;
use peduli_storage::StorageError;

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// HTTP-facing wrapper for oversight errors
///
/// Storage and transaction failures are logged with their driver detail and
/// answered with a generic message; every other kind forwards its own text.
pub struct ApiError(pub OversightError);

impl From<OversightError> for ApiError {
    fn from(err: OversightError) -> Self {
        ApiError(err)
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError(OversightError::StorageUnavailable(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self.0 {
            OversightError::AuthenticationRequired => {
                (StatusCode::UNAUTHORIZED, self.0.to_string())
            }
            OversightError::AccessDenied => (StatusCode::FORBIDDEN, self.0.to_string()),
            OversightError::NotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()),
            OversightError::InvalidStateTransition(_) => {
                (StatusCode::CONFLICT, self.0.to_string())
            }
            OversightError::ValidationFailure(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.0.to_string())
            }
            OversightError::TransactionFailed(_) => {
                error!("Transaction failed: {}", self.0);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            OversightError::StorageUnavailable(_) => {
                error!("Storage unavailable: {}", self.0);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, ResponseJson(ApiResponse::<()>::error(message))).into_response()
    }
}
