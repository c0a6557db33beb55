// ABOUTME: Shared application state for the HTTP layer
// ABOUTME: Wires domain storages into the oversight services handlers call

use peduli_oversight::{
    FinancialAggregator, LifecycleCoordinator, ReportQueryService, RiskClassifier,
};
use peduli_programs::DbState;

/// State shared by every router; cheap to clone, storages are behind Arcs
#[derive(Clone)]
pub struct AppState {
    pub db: DbState,
    pub finance: FinancialAggregator,
    pub risk: RiskClassifier,
    pub reports: ReportQueryService,
    pub lifecycle: LifecycleCoordinator,
}

impl AppState {
    /// Build the service layer on top of an initialized database state
    pub fn new(db: DbState) -> Self {
        let finance =
            FinancialAggregator::new(db.program_storage.clone(), db.report_storage.clone());
        let risk = RiskClassifier::new(db.program_storage.clone());
        let reports =
            ReportQueryService::new(db.program_storage.clone(), db.report_storage.clone());
        let lifecycle = LifecycleCoordinator::new(
            db.pool.clone(),
            db.proposal_storage.clone(),
            db.program_storage.clone(),
            db.user_storage.clone(),
        );

        AppState {
            db,
            finance,
            risk,
            reports,
            lifecycle,
        }
    }
}
