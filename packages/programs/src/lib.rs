// ABOUTME: Persistence gateway for the Peduli domain entities
// ABOUTME: SQLite-backed storages for users, proposals, programs, reports, and documents

pub mod db;
pub mod documents;
pub mod programs;
pub mod proposals;
pub mod reports;
pub mod users;

pub use db::DbState;
pub use documents::{DocumentCreateInput, DocumentStorage, ProgramDocument};
pub use programs::{FinalTerms, Program, ProgramActivity, ProgramStatus, ProgramStorage};
pub use proposals::{
    Pillar, ProgramProposal, ProposalCreateInput, ProposalStatus, ProposalStorage,
    ProposalUpdateInput,
};
pub use reports::{
    FinancialEntry, NarrativeEntry, ProgressReport, ReportFilter, ReportKind, ReportPayload,
    ReportStorage, ReportWithAuthor, ENTRY_TYPE_DONATION, ENTRY_TYPE_EXPENDITURE,
};
pub use users::{Role, User, UserCreateInput, UserStorage};
