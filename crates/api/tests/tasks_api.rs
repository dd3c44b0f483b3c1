//! HTTP-level integration tests for the task assignment & acceptance
//! protocol.

mod common;

use axum::http::StatusCode;
use common::{
    bearer, body_json, build_test_app, count_emails_with_reason, post_json, seed_user,
};
use sqlx::PgPool;

/// Create a bare event (no sub-workflow records) and return its id.
async fn create_event(app: &axum::Router, token: &str) -> i64 {
    let response = post_json(
        app,
        "/api/v1/events",
        token,
        serde_json::json!({ "title": "Spring Symposium", "event_date": "2027-03-12" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Test: only leads can be assigned
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_assigning_non_lead_fails(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let champion = seed_user(&pool, "Casey Champion", "casey@example.edu", "member").await;
    let member = seed_user(&pool, "Morgan Member", "morgan@example.edu", "member").await;

    let event_id = create_event(&app, &bearer(&champion)).await;

    let response = post_json(
        &app,
        &format!("/api/v1/events/{event_id}/tasks/room/assign"),
        &bearer(&champion),
        serde_json::json!({ "assignee_id": member.id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: assignment creates the workflow record and notifies the lead
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_assignment_creates_record_and_notifies(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let champion = seed_user(&pool, "Casey Champion", "casey@example.edu", "member").await;
    let lead = seed_user(&pool, "Lee Lead", "lee@example.edu", "lead").await;

    let event_id = create_event(&app, &bearer(&champion)).await;

    let response = post_json(
        &app,
        &format!("/api/v1/events/{event_id}/tasks/room/assign"),
        &bearer(&champion),
        serde_json::json!({ "assignee_id": lead.id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["assignee_id"], lead.id);
    assert!(json["data"]["accepted_at"].is_null());

    assert_eq!(count_emails_with_reason(&pool, "TASK_ASSIGNMENT").await, 1);
}

// ---------------------------------------------------------------------------
// Test: accepting a room task stamps acceptance and advances the status
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_accept_room_task_advances_status(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let champion = seed_user(&pool, "Casey Champion", "casey@example.edu", "member").await;
    let lead = seed_user(&pool, "Lee Lead", "lee@example.edu", "lead").await;

    let event_id = create_event(&app, &bearer(&champion)).await;
    post_json(
        &app,
        &format!("/api/v1/events/{event_id}/tasks/room/assign"),
        &bearer(&champion),
        serde_json::json!({ "assignee_id": lead.id }),
    )
    .await;

    let response = post_json(
        &app,
        &format!("/api/v1/events/{event_id}/tasks/room/accept"),
        &bearer(&lead),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(!json["data"]["accepted_at"].is_null());
    assert_eq!(json["data"]["status"], "ACCEPTED");
}

// ---------------------------------------------------------------------------
// Test: only the current assignee may accept
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_accept_by_non_assignee_is_forbidden(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let champion = seed_user(&pool, "Casey Champion", "casey@example.edu", "member").await;
    let lead = seed_user(&pool, "Lee Lead", "lee@example.edu", "lead").await;
    let other = seed_user(&pool, "Ola Other", "ola@example.edu", "lead").await;

    let event_id = create_event(&app, &bearer(&champion)).await;
    post_json(
        &app,
        &format!("/api/v1/events/{event_id}/tasks/flyer/assign"),
        &bearer(&champion),
        serde_json::json!({ "assignee_id": lead.id }),
    )
    .await;

    let response = post_json(
        &app,
        &format!("/api/v1/events/{event_id}/tasks/flyer/accept"),
        &bearer(&other),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Test: reassignment restarts the acceptance clock
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_reassignment_resets_acceptance(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let champion = seed_user(&pool, "Casey Champion", "casey@example.edu", "member").await;
    let first = seed_user(&pool, "Lee Lead", "lee@example.edu", "lead").await;
    let second = seed_user(&pool, "Val Lead", "val@example.edu", "lead").await;

    let event_id = create_event(&app, &bearer(&champion)).await;

    post_json(
        &app,
        &format!("/api/v1/events/{event_id}/tasks/room/assign"),
        &bearer(&champion),
        serde_json::json!({ "assignee_id": first.id }),
    )
    .await;
    post_json(
        &app,
        &format!("/api/v1/events/{event_id}/tasks/room/accept"),
        &bearer(&first),
        serde_json::json!({}),
    )
    .await;

    let response = post_json(
        &app,
        &format!("/api/v1/events/{event_id}/tasks/room/assign"),
        &bearer(&champion),
        serde_json::json!({ "assignee_id": second.id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["assignee_id"], second.id);
    assert!(json["data"]["accepted_at"].is_null());
    assert!(json["data"]["reminder_sent_at"].is_null());

    // Both assignments notified their respective lead.
    assert_eq!(count_emails_with_reason(&pool, "TASK_ASSIGNMENT").await, 2);
}
