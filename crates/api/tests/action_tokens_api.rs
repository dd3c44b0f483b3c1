//! HTTP-level integration tests for one-click action tokens.
//!
//! Submitting a catering request issues decision tokens for every finance
//! approver; the tests pull the opaque strings out of `action_tokens`
//! and drive the public `GET /api/v1/actions` endpoint.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{
    bearer, body_text, build_test_app, count_emails_with_reason, create_event_with_catering, get,
    post_json, seed_user,
};
use lchub_db::repositories::{ActionTokenRepo, CateringRepo};
use sqlx::PgPool;

/// Fetch the stored token string of the given type for an event.
async fn token_of_type(pool: &PgPool, event_id: i64, token_type: &str) -> String {
    sqlx::query_scalar(
        "SELECT token FROM action_tokens WHERE event_id = $1 AND token_type = $2 LIMIT 1",
    )
    .bind(event_id)
    .bind(token_type)
    .fetch_one(pool)
    .await
    .expect("issued token")
}

/// Seed users, create an event with catering, submit it, and return the
/// event id (submission issues the decision tokens).
async fn submitted_event(app: &axum::Router, pool: &PgPool) -> i64 {
    let champion = seed_user(pool, "Casey Champion", "casey@example.edu", "member").await;
    seed_user(pool, "Frankie Finance", "frankie@example.edu", "finance").await;

    let event_id = create_event_with_catering(app, &bearer(&champion)).await;
    let response = post_json(
        app,
        &format!("/api/v1/events/{event_id}/catering/submit"),
        &bearer(&champion),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    event_id
}

// ---------------------------------------------------------------------------
// Test: approval request issues one token per decision per approver
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_submission_issues_decision_tokens(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let event_id = submitted_event(&app, &pool).await;

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM action_tokens WHERE event_id = $1")
        .bind(event_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 3, "one approver, three decision links");

    assert_eq!(count_emails_with_reason(&pool, "APPROVAL_REQUEST").await, 1);
}

// ---------------------------------------------------------------------------
// Test: resolving an approve token applies the decision as the bound user
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_resolve_approve_token(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let event_id = submitted_event(&app, &pool).await;
    let token = token_of_type(&pool, event_id, "APPROVE").await;

    let response = get(&app, &format!("/api/v1/actions?token={token}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Approved"), "confirmation page: {html}");

    let record = CateringRepo::find_by_event(&pool, event_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.status, "APPROVED");
    assert_eq!(record.payment_status, "REQUESTED");
    assert!(record.decided_at.is_some());
    assert!(record.decided_by_id.is_some());

    // Token approval triggers the same automatic payment request as an
    // in-app approval.
    assert_eq!(count_emails_with_reason(&pool, "PAYMENT_REQUEST").await, 1);
}

// ---------------------------------------------------------------------------
// Test: double resolution applies the side effect exactly once
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_resolve_twice_reports_already_used(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let event_id = submitted_event(&app, &pool).await;
    let token = token_of_type(&pool, event_id, "APPROVE").await;

    let first = get(&app, &format!("/api/v1/actions?token={token}")).await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = get(&app, &format!("/api/v1/actions?token={token}")).await;
    assert_eq!(second.status(), StatusCode::OK);
    let html = body_text(second).await;
    assert!(html.contains("Already Used"), "second resolve: {html}");

    // Side effect ran once: still exactly one payment request email.
    assert_eq!(count_emails_with_reason(&pool, "PAYMENT_REQUEST").await, 1);
}

// ---------------------------------------------------------------------------
// Test: expired tokens do not apply the side effect
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_expired_token_is_rejected(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let champion = seed_user(&pool, "Casey Champion", "casey@example.edu", "member").await;
    let finance = seed_user(&pool, "Frankie Finance", "frankie@example.edu", "finance").await;
    let event_id = create_event_with_catering(&app, &bearer(&champion)).await;

    // Issue a token that expired an hour ago.
    let expired = ActionTokenRepo::create(
        &pool,
        "deadbeef-expired-token",
        "APPROVE",
        event_id,
        finance.id,
        Utc::now() - Duration::hours(1),
    )
    .await
    .unwrap();

    let response = get(&app, &format!("/api/v1/actions?token={}", expired.token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Link Expired"), "expired page: {html}");

    let record = CateringRepo::find_by_event(&pool, event_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.status, "DRAFT", "side effect must not run");
}

// ---------------------------------------------------------------------------
// Test: unknown and missing tokens
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_token_shows_invalid_page(pool: PgPool) {
    let app = build_test_app(pool.clone());

    let response = get(&app, "/api/v1/actions?token=no-such-token").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Invalid Link"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_missing_token_redirects_to_login(pool: PgPool) {
    let app = build_test_app(pool.clone());

    let response = get(&app, "/api/v1/actions").await;
    assert!(response.status().is_redirection());
    let location = response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(location.ends_with("/login"), "location: {location}");
}
