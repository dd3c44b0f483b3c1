//! HTTP-level integration tests for the catering approval + payment
//! workflow.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the
//! router. The notifier runs in dry mode, so notification behaviour is
//! asserted through the `email_logs` table.

mod common;

use axum::http::StatusCode;
use common::{
    bearer, body_json, build_test_app, count_emails_with_reason, create_event_with_catering,
    post_json, seed_user,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Test: approve decision couples into the payment axis
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_approve_sets_payment_requested(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let champion = seed_user(&pool, "Casey Champion", "casey@example.edu", "member").await;
    let finance = seed_user(&pool, "Frankie Finance", "frankie@example.edu", "finance").await;

    let event_id = create_event_with_catering(&app, &bearer(&champion)).await;

    let response = post_json(
        &app,
        &format!("/api/v1/events/{event_id}/catering/submit"),
        &bearer(&champion),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "AWAITING_APPROVAL");
    assert_eq!(json["data"]["revision_count"], 0);

    let response = post_json(
        &app,
        &format!("/api/v1/events/{event_id}/catering/decision"),
        &bearer(&finance),
        serde_json::json!({ "decision": "APPROVED" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "APPROVED");
    assert_eq!(json["data"]["payment_status"], "REQUESTED");
    assert_eq!(json["data"]["decided_by_id"], finance.id);
    assert!(!json["data"]["decided_at"].is_null());

    // Exactly one payment-request notification per processor (here: the
    // finance user doubles as the only processor).
    assert_eq!(count_emails_with_reason(&pool, "PAYMENT_REQUEST").await, 1);
}

// ---------------------------------------------------------------------------
// Test: explicit request-payment after approval shares the dedupe key
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_explicit_payment_request_is_deduplicated(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let champion = seed_user(&pool, "Casey Champion", "casey@example.edu", "member").await;
    let finance = seed_user(&pool, "Frankie Finance", "frankie@example.edu", "finance").await;

    let event_id = create_event_with_catering(&app, &bearer(&champion)).await;
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
        serde_json::json!({ "decision": "APPROVED" }),
    )
    .await;

    // The champion asks again explicitly; the automatic request already
    // fired, so the dedupe window suppresses a second email.
    let response = post_json(
        &app,
        &format!("/api/v1/events/{event_id}/catering/request-payment"),
        &bearer(&champion),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(count_emails_with_reason(&pool, "PAYMENT_REQUEST").await, 1);
}

// ---------------------------------------------------------------------------
// Test: payment is gated on approval
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_request_payment_blocked_until_approved(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let champion = seed_user(&pool, "Casey Champion", "casey@example.edu", "member").await;

    let event_id = create_event_with_catering(&app, &bearer(&champion)).await;

    let response = post_json(
        &app,
        &format!("/api/v1/events/{event_id}/catering/request-payment"),
        &bearer(&champion),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    assert_eq!(count_emails_with_reason(&pool, "PAYMENT_REQUEST").await, 0);
}

// ---------------------------------------------------------------------------
// Test: changes-requested cycle increments the revision count once
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_resubmission_increments_revision_count(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let champion = seed_user(&pool, "Casey Champion", "casey@example.edu", "member").await;
    let finance = seed_user(&pool, "Frankie Finance", "frankie@example.edu", "finance").await;

    let event_id = create_event_with_catering(&app, &bearer(&champion)).await;

    post_json(
        &app,
        &format!("/api/v1/events/{event_id}/catering/submit"),
        &bearer(&champion),
        serde_json::json!({}),
    )
    .await;

    let response = post_json(
        &app,
        &format!("/api/v1/events/{event_id}/catering/decision"),
        &bearer(&finance),
        serde_json::json!({ "decision": "CHANGES_REQUESTED", "change_notes": "Less coffee" }),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "CHANGES_REQUESTED");
    assert_eq!(json["data"]["change_notes"], "Less coffee");

    // First resubmission cycle.
    let response = post_json(
        &app,
        &format!("/api/v1/events/{event_id}/catering/submit"),
        &bearer(&champion),
        serde_json::json!({}),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "AWAITING_APPROVAL");
    assert_eq!(json["data"]["revision_count"], 1);

    // Second cycle.
    post_json(
        &app,
        &format!("/api/v1/events/{event_id}/catering/decision"),
        &bearer(&finance),
        serde_json::json!({ "decision": "CHANGES_REQUESTED", "change_notes": "More coffee" }),
    )
    .await;
    let response = post_json(
        &app,
        &format!("/api/v1/events/{event_id}/catering/submit"),
        &bearer(&champion),
        serde_json::json!({}),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["revision_count"], 2);
}

// ---------------------------------------------------------------------------
// Test: change notes are cleared on a non-changes decision
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_change_notes_cleared_on_approval(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let champion = seed_user(&pool, "Casey Champion", "casey@example.edu", "member").await;
    let finance = seed_user(&pool, "Frankie Finance", "frankie@example.edu", "finance").await;

    let event_id = create_event_with_catering(&app, &bearer(&champion)).await;
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
        serde_json::json!({ "decision": "CHANGES_REQUESTED", "change_notes": "Vegetarian option" }),
    )
    .await;
    post_json(
        &app,
        &format!("/api/v1/events/{event_id}/catering/submit"),
        &bearer(&champion),
        serde_json::json!({}),
    )
    .await;

    let response = post_json(
        &app,
        &format!("/api/v1/events/{event_id}/catering/decision"),
        &bearer(&finance),
        serde_json::json!({ "decision": "APPROVED", "change_notes": "ignored" }),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "APPROVED");
    assert!(json["data"]["change_notes"].is_null());
}

// ---------------------------------------------------------------------------
// Test: capability gates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_decision_requires_finance_capability(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let champion = seed_user(&pool, "Casey Champion", "casey@example.edu", "member").await;

    let event_id = create_event_with_catering(&app, &bearer(&champion)).await;
    post_json(
        &app,
        &format!("/api/v1/events/{event_id}/catering/submit"),
        &bearer(&champion),
        serde_json::json!({}),
    )
    .await;

    let response = post_json(
        &app,
        &format!("/api/v1/events/{event_id}/catering/decision"),
        &bearer(&champion),
        serde_json::json!({ "decision": "APPROVED" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Test: mark-paid defaults the note and stamps the payer
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_mark_paid_defaults_note(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let champion = seed_user(&pool, "Casey Champion", "casey@example.edu", "member").await;
    let finance = seed_user(&pool, "Frankie Finance", "frankie@example.edu", "finance").await;
    let payer = seed_user(&pool, "Pat Payments", "pat@example.edu", "payment_admin").await;

    let event_id = create_event_with_catering(&app, &bearer(&champion)).await;
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
        serde_json::json!({ "decision": "APPROVED" }),
    )
    .await;

    let response = post_json(
        &app,
        &format!("/api/v1/events/{event_id}/catering/mark-paid"),
        &bearer(&payer),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["payment_status"], "PAID");
    assert_eq!(json["data"]["payment_note"], "Done");
    assert_eq!(json["data"]["paid_by_id"], payer.id);
    assert!(!json["data"]["paid_at"].is_null());
}

// ---------------------------------------------------------------------------
// Test: submitting with no catering record fails with 404
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_submit_without_record_is_not_found(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let champion = seed_user(&pool, "Casey Champion", "casey@example.edu", "member").await;

    // Event without a catering payload.
    let response = post_json(
        &app,
        "/api/v1/events",
        &bearer(&champion),
        serde_json::json!({ "title": "No Catering", "event_date": "2026-10-01" }),
    )
    .await;
    let event_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = post_json(
        &app,
        &format!("/api/v1/events/{event_id}/catering/submit"),
        &bearer(&champion),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
