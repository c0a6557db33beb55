// ABOUTME: Common test utilities for API integration tests
// ABOUTME: Provides test server setup, seed helpers, and HTTP client utilities

use axum::Router;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::sqlite::SqlitePoolOptions;
use std::str::FromStr;

use peduli_api::{
    create_dashboard_router, create_programs_router, create_proposals_router, create_users_router,
    AppState,
};
use peduli_programs::{
    DbState, Pillar, ProgramProposal, ProgramStatus, ProposalCreateInput, ReportKind, Role, User,
    UserCreateInput,
};

/// Test context containing the server URL and direct database access
pub struct TestContext {
    pub base_url: String,
    pub db: DbState,
}

/// Create a test server with an isolated in-memory database
pub async fn setup_test_server() -> TestContext {
    // A single connection keeps every query on the same memory database
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

    let db = DbState::new(pool);
    let state = AppState::new(db.clone());

    // Same nesting the server binary uses, so tests hit production paths
    let app = Router::new()
        .nest("/api/dashboard", create_dashboard_router())
        .nest("/api/proposals", create_proposals_router())
        .nest("/api/programs", create_programs_router())
        .nest("/api/users", create_users_router())
        .with_state(state);

    // Bind to random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give server time to start
    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

    TestContext { base_url, db }
}

/// Helper to make GET requests without an identity header
#[allow(dead_code)]
pub async fn get(base_url: &str, path: &str) -> reqwest::Response {
    let client = reqwest::Client::new();
    client
        .get(format!("{}{}", base_url, path))
        .send()
        .await
        .expect("Failed to make GET request")
}

/// Helper to make GET requests as a given user
#[allow(dead_code)]
pub async fn get_as(base_url: &str, path: &str, user_id: &str) -> reqwest::Response {
    let client = reqwest::Client::new();
    client
        .get(format!("{}{}", base_url, path))
        .header("x-user-id", user_id)
        .send()
        .await
        .expect("Failed to make GET request")
}

/// Helper to make POST requests with a JSON body as a given user
#[allow(dead_code)]
pub async fn post_json_as<T: serde::Serialize>(
    base_url: &str,
    path: &str,
    user_id: &str,
    body: &T,
) -> reqwest::Response {
    let client = reqwest::Client::new();
    client
        .post(format!("{}{}", base_url, path))
        .header("x-user-id", user_id)
        .json(body)
        .send()
        .await
        .expect("Failed to make POST request")
}

/// Helper to make PUT requests with a JSON body as a given user
#[allow(dead_code)]
pub async fn put_json_as<T: serde::Serialize>(
    base_url: &str,
    path: &str,
    user_id: &str,
    body: &T,
) -> reqwest::Response {
    let client = reqwest::Client::new();
    client
        .put(format!("{}{}", base_url, path))
        .header("x-user-id", user_id)
        .json(body)
        .send()
        .await
        .expect("Failed to make PUT request")
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
pub async fn seed_proposal(db: &DbState, created_by: &str, title: &str) -> ProgramProposal {
    db.proposal_storage
        .create_proposal(
            created_by,
            ProposalCreateInput {
                title: title.to_string(),
                category: Pillar::Education,
                location: "Bandung".to_string(),
                background: Some("Community request".to_string()),
                objective: None,
                estimated_budget: Decimal::from_str("2500000.50").unwrap(),
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
    created_at: DateTime<Utc>,
) -> String {
    let creator = seed_user(db, "seed-creator", Role::User).await;
    let proposal = seed_proposal(db, &creator.id, "Seeded").await;

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
    .bind(ProgramStatus::Running)
    .bind(created_at)
    .execute(&db.pool)
    .await
    .unwrap();

    program_id
}

#[allow(dead_code)]
pub async fn seed_program(db: &DbState, responsible_user_id: &str, budget: &str) -> String {
    seed_program_at(db, responsible_user_id, Pillar::Education, budget, Utc::now()).await
}

/// Insert a report row directly, bypassing the write-boundary validation.
#[allow(dead_code)]
pub async fn seed_report(
    db: &DbState,
    program_id: &str,
    author_id: &str,
    kind: ReportKind,
    payload: &str,
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
    .bind(Utc::now())
    .execute(&db.pool)
    .await
    .unwrap();

    report_id
}
