// ABOUTME: HTTP API layer for Peduli providing REST endpoints and routing
// ABOUTME: Integration layer that wires domain storages into oversight services

use axum::{
    routing::{get, post, put},
    Router,
};

pub mod auth;
pub mod dashboard_handlers;
pub mod documents_handlers;
pub mod programs_handlers;
pub mod proposals_handlers;
pub mod reports_handlers;
pub mod response;
pub mod state;
pub mod users_handlers;

pub use state::AppState;

/// Creates the dashboard API router
///
/// Dashboard overviews are read-only aggregates and carry no identity
/// requirement.
pub fn create_dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/budget-analysis", get(dashboard_handlers::budget_analysis))
        .route("/at-risk", get(dashboard_handlers::at_risk_programs))
}

/// Creates the proposals API router
pub fn create_proposals_router() -> Router<AppState> {
    Router::new()
        .route("/", get(proposals_handlers::list_proposals))
        .route("/", post(proposals_handlers::create_proposal))
        .route("/{id}", get(proposals_handlers::get_proposal))
        .route("/{id}", put(proposals_handlers::update_proposal))
        .route("/{id}/review", post(proposals_handlers::review_proposal))
        .route("/{id}/activate", post(proposals_handlers::activate_proposal))
}

/// Creates the programs API router
pub fn create_programs_router() -> Router<AppState> {
    Router::new()
        .route("/", get(programs_handlers::list_programs))
        .route("/{id}", get(programs_handlers::get_program))
        .route("/{id}/status", put(programs_handlers::update_program_status))
        .route("/{id}/reports", get(reports_handlers::list_reports))
        .route("/{id}/reports", post(reports_handlers::create_report))
        .route("/{id}/documents", get(documents_handlers::list_documents))
        .route("/{id}/documents", post(documents_handlers::create_document))
}

/// Creates the users API router
pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(users_handlers::list_users))
        .route("/", post(users_handlers::create_user))
        .route("/{id}", get(users_handlers::get_user))
}
