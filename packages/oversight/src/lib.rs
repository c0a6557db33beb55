// ABOUTME: Oversight services for program portfolio monitoring
// ABOUTME: Budget aggregation, staleness-based risk flagging, report queries, and lifecycle control

pub mod access;
pub mod error;
pub mod finance;
pub mod lifecycle;
pub mod pagination;
pub mod reports;
pub mod risk;

pub use access::{can_access_program, Requester};
pub use error::{OversightError, OversightResult};
pub use finance::{CategoryFinancials, FinancialAggregator, FinancialOverview};
pub use lifecycle::{CloseOutcome, LifecycleCoordinator, ReviewDecision};
pub use pagination::{PageMeta, PageParams, Paginated, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use reports::{ReportPage, ReportQuery, ReportQueryService};
pub use risk::{AtRiskOverview, RiskClassifier, STALENESS_THRESHOLD_DAYS};
