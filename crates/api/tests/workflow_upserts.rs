//! HTTP-level integration tests for the room/flyer upsert paths and the
//! event detail view.

mod common;

use axum::http::StatusCode;
use common::{bearer, body_json, build_test_app, get_auth, post_json, put_json, seed_user};
use sqlx::PgPool;

async fn create_event(app: &axum::Router, token: &str) -> i64 {
    let response = post_json(
        app,
        "/api/v1/events",
        token,
        serde_json::json!({ "title": "Alumni Panel", "event_date": "2026-11-05" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Test: room upsert creates, then updates in place
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_room_upsert_creates_then_updates(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let champion = seed_user(&pool, "Casey Champion", "casey@example.edu", "member").await;
    let event_id = create_event(&app, &bearer(&champion)).await;

    // No record yet: the update creates one.
    let response = put_json(
        &app,
        &format!("/api/v1/events/{event_id}/room"),
        &bearer(&champion),
        serde_json::json!({ "room_name": "Burke Auditorium" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["room_name"], "Burke Auditorium");
    assert_eq!(json["data"]["status"], "PENDING");
    let record_id = json["data"]["id"].as_i64().unwrap();

    // Second update replaces fields but preserves identity.
    let response = put_json(
        &app,
        &format!("/api/v1/events/{event_id}/room"),
        &bearer(&champion),
        serde_json::json!({ "room_name": "Bowers Hall", "confirmation_id": "RES-1207" }),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], record_id);
    assert_eq!(json["data"]["room_name"], "Bowers Hall");
    assert_eq!(json["data"]["confirmation_id"], "RES-1207");
}

// ---------------------------------------------------------------------------
// Test: confirming a room stamps confirmed_at once
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_room_confirmation_stamp_is_sticky(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let champion = seed_user(&pool, "Casey Champion", "casey@example.edu", "member").await;
    let event_id = create_event(&app, &bearer(&champion)).await;

    let response = put_json(
        &app,
        &format!("/api/v1/events/{event_id}/room"),
        &bearer(&champion),
        serde_json::json!({ "room_name": "Burke Auditorium", "status": "CONFIRMED" }),
    )
    .await;
    let json = body_json(response).await;
    let first_stamp = json["data"]["confirmed_at"].as_str().unwrap().to_string();

    // Re-confirming keeps the original stamp.
    let response = put_json(
        &app,
        &format!("/api/v1/events/{event_id}/room"),
        &bearer(&champion),
        serde_json::json!({ "room_name": "Burke Auditorium", "status": "CONFIRMED" }),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["confirmed_at"], first_stamp.as_str());
}

// ---------------------------------------------------------------------------
// Test: unknown statuses are rejected
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_room_status_rejected(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let champion = seed_user(&pool, "Casey Champion", "casey@example.edu", "member").await;
    let event_id = create_event(&app, &bearer(&champion)).await;

    let response = put_json(
        &app,
        &format!("/api/v1/events/{event_id}/room"),
        &bearer(&champion),
        serde_json::json!({ "status": "BOOKED" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: flyer upsert and event detail aggregation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_flyer_upsert_and_event_detail(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let champion = seed_user(&pool, "Casey Champion", "casey@example.edu", "member").await;
    let event_id = create_event(&app, &bearer(&champion)).await;

    let response = put_json(
        &app,
        &format!("/api/v1/events/{event_id}/flyer"),
        &bearer(&champion),
        serde_json::json!({ "design_status": "IN_PROGRESS", "dist_email": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["design_status"], "IN_PROGRESS");
    assert_eq!(json["data"]["dist_email"], true);

    let response = get_auth(
        &app,
        &format!("/api/v1/events/{event_id}"),
        &bearer(&champion),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["event"]["id"], event_id);
    assert_eq!(json["data"]["flyer"]["design_status"], "IN_PROGRESS");
    assert!(json["data"]["room"].is_null());
    // The default day-of checklist was seeded at creation.
    assert!(json["data"]["checklist"].as_array().unwrap().len() >= 10);
}

// ---------------------------------------------------------------------------
// Test: requests without a bearer token are unauthenticated
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_missing_auth_is_rejected(pool: PgPool) {
    let app = build_test_app(pool.clone());

    let response = common::get(&app, "/api/v1/events").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHENTICATED");
}
