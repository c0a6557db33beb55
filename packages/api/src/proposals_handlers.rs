// ABOUTME: HTTP request handlers for program proposal operations
// ABOUTME: Covers submission, listing, editing, review, and activation

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
use peduli_oversight::{OversightError, ReviewDecision};
use peduli_programs::{FinalTerms, ProposalCreateInput, ProposalStatus, ProposalUpdateInput};

/// Submit a new proposal; it starts out SUBMITTED
pub async fn create_proposal(
    State(state): State<AppState>,
    CurrentUser(requester): CurrentUser,
    Json(input): Json<ProposalCreateInput>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Submitting proposal: {}", input.title);

    let proposal = state
        .db
        .proposal_storage
        .create_proposal(&requester.user_id, input)
        .await?;

    Ok((
        StatusCode::CREATED,
        ResponseJson(ApiResponse::success(proposal)),
    ))
}

/// List proposals; admins see all, users see their own
pub async fn list_proposals(
    State(state): State<AppState>,
    CurrentUser(requester): CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    info!("Listing proposals");

    let proposals = if requester.is_admin() {
        state.db.proposal_storage.list_proposals().await?
    } else {
        state
            .db
            .proposal_storage
            .list_proposals_by_creator(&requester.user_id)
            .await?
    };

    Ok((
        StatusCode::OK,
        ResponseJson(ApiResponse::success(proposals)),
    ))
}

/// Get a proposal by ID; visible to its submitter and admins
pub async fn get_proposal(
    State(state): State<AppState>,
    CurrentUser(requester): CurrentUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Getting proposal: {}", id);

    let proposal = state
        .db
        .proposal_storage
        .get_proposal(&id)
        .await?
        .ok_or_else(|| OversightError::not_found("Proposal", &id))?;

    if !requester.is_admin() && proposal.created_by != requester.user_id {
        return Err(OversightError::AccessDenied.into());
    }

    Ok((StatusCode::OK, ResponseJson(ApiResponse::success(proposal))))
}

/// Edit a proposal; only its submitter may, and only while it is SUBMITTED
pub async fn update_proposal(
    State(state): State<AppState>,
    CurrentUser(requester): CurrentUser,
    Path(id): Path<String>,
    Json(input): Json<ProposalUpdateInput>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Updating proposal: {}", id);

    let proposal = state
        .db
        .proposal_storage
        .get_proposal(&id)
        .await?
        .ok_or_else(|| OversightError::not_found("Proposal", &id))?;

    if proposal.created_by != requester.user_id {
        return Err(OversightError::AccessDenied.into());
    }

    if proposal.status != ProposalStatus::Submitted {
        return Err(OversightError::InvalidStateTransition(format!(
            "proposal '{}' is {:?}, only SUBMITTED proposals can be edited",
            id, proposal.status
        ))
        .into());
    }

    let updated = state
        .db
        .proposal_storage
        .update_proposal(&id, input)
        .await?
        .ok_or_else(|| OversightError::not_found("Proposal", &id))?;

    Ok((StatusCode::OK, ResponseJson(ApiResponse::success(updated))))
}

/// Request body for reviewing a proposal
#[derive(Deserialize)]
pub struct ReviewRequest {
    pub decision: ReviewDecision,
}

/// Approve or reject a submitted proposal (admin only)
pub async fn review_proposal(
    State(state): State<AppState>,
    CurrentUser(requester): CurrentUser,
    Path(id): Path<String>,
    Json(request): Json<ReviewRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Reviewing proposal: {}", id);

    let proposal = state
        .lifecycle
        .review(&id, &requester, request.decision)
        .await?;

    Ok((StatusCode::OK, ResponseJson(ApiResponse::success(proposal))))
}

/// Turn an approved proposal into a running program (admin only)
pub async fn activate_proposal(
    State(state): State<AppState>,
    CurrentUser(requester): CurrentUser,
    Path(id): Path<String>,
    Json(terms): Json<FinalTerms>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Activating proposal: {}", id);

    let program = state.lifecycle.activate(&id, &requester, terms).await?;

    Ok((
        StatusCode::CREATED,
        ResponseJson(ApiResponse::success(program)),
    ))
}
