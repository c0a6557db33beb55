// ABOUTME: Error taxonomy for oversight operations
// ABOUTME: Distinguishes caller mistakes from authorization failures and infrastructure faults

use peduli_storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OversightError {
    /// No usable identity accompanied the request.
    #[error("Authentication required")]
    AuthenticationRequired,

    /// The requester is known but not allowed to do this.
    #[error("Access denied")]
    AccessDenied,

    #[error("{0} not found")]
    NotFound(String),

    /// The entity exists but is not in a state this operation accepts.
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    #[error("Validation failure: {0}")]
    ValidationFailure(String),

    /// A multi-step write could not be committed; nothing was persisted.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] StorageError),
}

pub type OversightResult<T> = Result<T, OversightError>;

impl OversightError {
    pub fn not_found(entity: &str, id: &str) -> Self {
        OversightError::NotFound(format!("{} '{}'", entity, id))
    }
}
