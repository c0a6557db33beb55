// ABOUTME: Integration tests for program API endpoints
// ABOUTME: Tests close-out transitions and program access rules

mod common;

use common::{get_as, put_json_as, seed_program, seed_user, setup_test_server};
use peduli_programs::Role;
use serde_json::json;

#[tokio::test]
async fn test_close_program_as_completed() {
    let ctx = setup_test_server().await;
    let responsible = seed_user(&ctx.db, "Dewi Anggraini", Role::User).await;
    let admin = seed_user(&ctx.db, "Admin", Role::Admin).await;
    let program_id = seed_program(&ctx.db, &responsible.id, "5000.00").await;

    let response = put_json_as(
        &ctx.base_url,
        &format!("/api/programs/{}/status", program_id),
        &admin.id,
        &json!({"status": "COMPLETED"}),
    )
    .await;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "COMPLETED");

    // A closed program cannot be closed again
    let response = put_json_as(
        &ctx.base_url,
        &format!("/api/programs/{}/status", program_id),
        &admin.id,
        &json!({"status": "HALTED"}),
    )
    .await;
    assert_eq!(response.status(), 409);
}

#[tokio::test]
async fn test_close_program_as_halted() {
    let ctx = setup_test_server().await;
    let responsible = seed_user(&ctx.db, "Dewi Anggraini", Role::User).await;
    let admin = seed_user(&ctx.db, "Admin", Role::Admin).await;
    let program_id = seed_program(&ctx.db, &responsible.id, "5000.00").await;

    let response = put_json_as(
        &ctx.base_url,
        &format!("/api/programs/{}/status", program_id),
        &admin.id,
        &json!({"status": "HALTED"}),
    )
    .await;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["status"], "HALTED");
}

#[tokio::test]
async fn test_close_program_requires_admin() {
    let ctx = setup_test_server().await;
    let responsible = seed_user(&ctx.db, "Dewi Anggraini", Role::User).await;
    let program_id = seed_program(&ctx.db, &responsible.id, "5000.00").await;

    // Even the responsible user cannot close their own program
    let response = put_json_as(
        &ctx.base_url,
        &format!("/api/programs/{}/status", program_id),
        &responsible.id,
        &json!({"status": "COMPLETED"}),
    )
    .await;
    assert_eq!(response.status(), 403);

    let response = get_as(
        &ctx.base_url,
        &format!("/api/programs/{}", program_id),
        &responsible.id,
    )
    .await;
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["status"], "RUNNING");
}

#[tokio::test]
async fn test_program_detail_access() {
    let ctx = setup_test_server().await;
    let responsible = seed_user(&ctx.db, "Dewi Anggraini", Role::User).await;
    let outsider = seed_user(&ctx.db, "Eka Putra", Role::User).await;
    let admin = seed_user(&ctx.db, "Admin", Role::Admin).await;
    let program_id = seed_program(&ctx.db, &responsible.id, "5000.00").await;

    let response = get_as(
        &ctx.base_url,
        &format!("/api/programs/{}", program_id),
        &responsible.id,
    )
    .await;
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["responsibleUserId"], responsible.id);

    let response = get_as(
        &ctx.base_url,
        &format!("/api/programs/{}", program_id),
        &admin.id,
    )
    .await;
    assert_eq!(response.status(), 200);

    let response = get_as(
        &ctx.base_url,
        &format!("/api/programs/{}", program_id),
        &outsider.id,
    )
    .await;
    assert_eq!(response.status(), 403);

    // Missing programs are 404 before any access decision
    let response = get_as(&ctx.base_url, "/api/programs/nonexistent", &outsider.id).await;
    assert_eq!(response.status(), 404);
}
