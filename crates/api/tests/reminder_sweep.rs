//! HTTP-level integration tests for the reminder sweep.
//!
//! Staleness is simulated by backdating the workflow row's `created_at`.

mod common;

use axum::http::StatusCode;
use common::{
    bearer, body_json, build_test_app, count_emails_with_reason, get, post_json, seed_user,
};
use sqlx::PgPool;

/// Create a bare event and assign the catering task to `assignee_id`.
async fn event_with_catering_assignment(
    app: &axum::Router,
    champion_token: &str,
    assignee_id: i64,
) -> i64 {
    let response = post_json(
        app,
        "/api/v1/events",
        champion_token,
        serde_json::json!({ "title": "Winter Workshop", "event_date": "2026-12-01" }),
    )
    .await;
    let event_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = post_json(
        app,
        &format!("/api/v1/events/{event_id}/tasks/catering/assign"),
        champion_token,
        serde_json::json!({ "assignee_id": assignee_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    event_id
}

/// Backdate the catering row so it crosses the 7-day staleness window.
async fn backdate_catering(pool: &PgPool, event_id: i64, days: i32) {
    sqlx::query(
        "UPDATE catering_approvals SET created_at = now() - make_interval(days => $2)
         WHERE event_id = $1",
    )
    .bind(event_id)
    .bind(days)
    .execute(pool)
    .await
    .unwrap();
}

/// Run the sweep endpoint and return the reported count.
async fn run_sweep(app: &axum::Router) -> i64 {
    let response = get(app, "/api/v1/reminders/run").await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["reminders"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Test: an 8-day-old unaccepted task gets exactly one reminder
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_sweep_sends_once_even_when_run_twice(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let champion = seed_user(&pool, "Casey Champion", "casey@example.edu", "member").await;
    let lead = seed_user(&pool, "Lee Lead", "lee@example.edu", "lead").await;

    let event_id = event_with_catering_assignment(&app, &bearer(&champion), lead.id).await;
    backdate_catering(&pool, event_id, 8).await;

    assert_eq!(run_sweep(&app).await, 1);
    assert_eq!(run_sweep(&app).await, 0, "reminder_sent_at gates the rerun");

    assert_eq!(count_emails_with_reason(&pool, "TASK_REMINDER").await, 1);

    let reminder_sent_at: Option<chrono::DateTime<chrono::Utc>> = sqlx::query_scalar(
        "SELECT reminder_sent_at FROM catering_approvals WHERE event_id = $1",
    )
    .bind(event_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert!(reminder_sent_at.is_some());
}

// ---------------------------------------------------------------------------
// Test: tasks inside the window are left alone
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_sweep_skips_fresh_tasks(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let champion = seed_user(&pool, "Casey Champion", "casey@example.edu", "member").await;
    let lead = seed_user(&pool, "Lee Lead", "lee@example.edu", "lead").await;

    let event_id = event_with_catering_assignment(&app, &bearer(&champion), lead.id).await;
    backdate_catering(&pool, event_id, 6).await;

    assert_eq!(run_sweep(&app).await, 0);
}

// ---------------------------------------------------------------------------
// Test: accepted tasks are not reminded
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_sweep_skips_accepted_tasks(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let champion = seed_user(&pool, "Casey Champion", "casey@example.edu", "member").await;
    let lead = seed_user(&pool, "Lee Lead", "lee@example.edu", "lead").await;

    let event_id = event_with_catering_assignment(&app, &bearer(&champion), lead.id).await;
    post_json(
        &app,
        &format!("/api/v1/events/{event_id}/tasks/catering/accept"),
        &bearer(&lead),
        serde_json::json!({}),
    )
    .await;
    backdate_catering(&pool, event_id, 8).await;

    assert_eq!(run_sweep(&app).await, 0);
}

// ---------------------------------------------------------------------------
// Test: decided catering workflows are terminal for the sweep
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_sweep_skips_terminal_workflows(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let champion = seed_user(&pool, "Casey Champion", "casey@example.edu", "member").await;
    let lead = seed_user(&pool, "Lee Lead", "lee@example.edu", "lead").await;
    let finance = seed_user(&pool, "Frankie Finance", "frankie@example.edu", "finance").await;

    let event_id = event_with_catering_assignment(&app, &bearer(&champion), lead.id).await;
    post_json(
        &app,
        &format!("/api/v1/events/{event_id}/catering/submit"),
        &bearer(&champion),
        serde_json::json!({}),
    )
    .await;
    post_json(
        &app,
        &format!("/api/v1/events/{event_id}/catering/decision"),
        &bearer(&finance),
        serde_json::json!({ "decision": "REJECTED" }),
    )
    .await;
    backdate_catering(&pool, event_id, 8).await;

    assert_eq!(run_sweep(&app).await, 0);
}

// ---------------------------------------------------------------------------
// Test: reassignment re-arms the reminder after another stale window
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_reassignment_rearms_reminder(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let champion = seed_user(&pool, "Casey Champion", "casey@example.edu", "member").await;
    let first = seed_user(&pool, "Lee Lead", "lee@example.edu", "lead").await;
    let second = seed_user(&pool, "Val Lead", "val@example.edu", "lead").await;

    let event_id = event_with_catering_assignment(&app, &bearer(&champion), first.id).await;
    backdate_catering(&pool, event_id, 8).await;
    assert_eq!(run_sweep(&app).await, 1);

    // Reassignment clears reminder_sent_at; the row is still old, so the
    // next sweep fires again for the new assignee.
    post_json(
        &app,
        &format!("/api/v1/events/{event_id}/tasks/catering/assign"),
        &bearer(&champion),
        serde_json::json!({ "assignee_id": second.id }),
    )
    .await;

    assert_eq!(run_sweep(&app).await, 1);
    assert_eq!(count_emails_with_reason(&pool, "TASK_REMINDER").await, 2);
}
