// ABOUTME: Common test utilities for oversight integration tests
// ABOUTME: Provides database setup and seed helpers for users, programs, and reports

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::sqlite::SqlitePoolOptions;
use std::str::FromStr;

use peduli_programs::{
    DbState, Pillar, ProgramProposal, ProgramStatus, ProposalCreateInput, ReportKind, Role, User,
    UserCreateInput,
};

/// Create an in-memory database with the full schema applied. A single
/// connection keeps every query on the same memory database.
pub async fn create_test_db() -> DbState {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create database pool");

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .unwrap();

    sqlx::migrate!("../storage/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    DbState::new(pool)
}

pub async fn seed_user(db: &DbState, name: &str, role: Role) -> User {
    db.user_storage
        .create_user(UserCreateInput {
            name: name.to_string(),
            email: format!(
                "{}-{}@example.org",
                name.to_lowercase().replace(' ', "."),
                peduli_core::generate_id()
            ),
            password_hash: "hash".to_string(),
            role,
        })
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn seed_proposal(
    db: &DbState,
    created_by: &str,
    title: &str,
    category: Pillar,
    budget: &str,
) -> ProgramProposal {
    db.proposal_storage
        .create_proposal(
            created_by,
            ProposalCreateInput {
                title: title.to_string(),
                category,
                location: "Bandung".to_string(),
                background: Some("Community request".to_string()),
                objective: None,
                estimated_budget: Decimal::from_str(budget).unwrap(),
            },
        )
        .await
        .unwrap()
}

/// Seed a program row directly; in production these only appear through the
/// activation transaction.
#[allow(dead_code)]
pub async fn seed_program_at(
    db: &DbState,
    responsible_user_id: &str,
    category: Pillar,
    budget: &str,
    status: ProgramStatus,
    created_at: DateTime<Utc>,
) -> String {
    let creator = seed_user(db, "seed-creator", Role::User).await;
    let proposal = seed_proposal(db, &creator.id, "Seeded", category, budget).await;

    let program_id = peduli_core::generate_id();
    sqlx::query(
        r#"
        INSERT INTO programs (
            id, proposal_id, title, category, location, final_budget,
            start_date, end_date, responsible_user_id, status, created_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&program_id)
    .bind(&proposal.id)
    .bind("Seeded program")
    .bind(category)
    .bind("Bandung")
    .bind(budget)
    .bind(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
    .bind(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap())
    .bind(responsible_user_id)
    .bind(status)
    .bind(created_at)
    .execute(&db.pool)
    .await
    .unwrap();

    program_id
}

#[allow(dead_code)]
pub async fn seed_program(
    db: &DbState,
    responsible_user_id: &str,
    category: Pillar,
    budget: &str,
) -> String {
    seed_program_at(
        db,
        responsible_user_id,
        category,
        budget,
        ProgramStatus::Running,
        Utc::now(),
    )
    .await
}

/// Insert a report row with full control over payload and timestamp. Raw
/// insertion deliberately bypasses boundary validation so tests can plant
/// legacy or corrupt payloads.
#[allow(dead_code)]
pub async fn seed_report_at(
    db: &DbState,
    program_id: &str,
    author_id: &str,
    kind: ReportKind,
    payload: &str,
    created_at: DateTime<Utc>,
) -> String {
    let report_id = peduli_core::generate_id();
    sqlx::query(
        r#"
        INSERT INTO progress_reports (id, program_id, kind, payload, author_id, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&report_id)
    .bind(program_id)
    .bind(kind)
    .bind(payload)
    .bind(author_id)
    .bind(created_at)
    .execute(&db.pool)
    .await
    .unwrap();

    report_id
}

#[allow(dead_code)]
pub async fn seed_report(
    db: &DbState,
    program_id: &str,
    author_id: &str,
    kind: ReportKind,
    payload: &str,
) -> String {
    seed_report_at(db, program_id, author_id, kind, payload, Utc::now()).await
}
