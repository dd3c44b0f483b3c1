//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the production router (same middleware stack as `main.rs`)
//! against a test pool, with the notifier in dry mode so every "sent"
//! email lands only in the `email_logs` table.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;

use lchub_api::auth::jwt::{generate_access_token, JwtConfig};
use lchub_api::auth::password::hash_password;
use lchub_api::config::ServerConfig;
use lchub_api::notify::Notifier;
use lchub_api::routes;
use lchub_api::state::AppState;
use lchub_db::models::user::{CreateUser, User};
use lchub_db::repositories::UserRepo;

/// Base URL used for links in dry-mode emails and redirects.
pub const TEST_APP_URL: &str = "http://localhost:3000";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        app_url: TEST_APP_URL.to_string(),
        jwt: test_jwt_config(),
    }
}

fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        access_token_expiry_mins: 60,
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool. Mirrors the router construction in `main.rs`
/// so tests exercise the same stack production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let notifier = Arc::new(Notifier::new(None, TEST_APP_URL.to_string()));

    let state = AppState {
        pool,
        config: Arc::new(config),
        notifier,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Seed a user with the given role and return the row.
pub async fn seed_user(pool: &PgPool, name: &str, email: &str, role: &str) -> User {
    let password_hash = hash_password("correct-horse-battery").expect("hash");
    UserRepo::create(
        pool,
        &CreateUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
            role: role.to_string(),
        },
    )
    .await
    .expect("seed user")
}

/// Mint a bearer token for a seeded user.
pub fn bearer(user: &User) -> String {
    generate_access_token(user.id, &user.role, &test_jwt_config()).expect("token")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request without authentication.
pub async fn get(app: &Router, path: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::get(path).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Send a GET request with a bearer token.
pub async fn get_auth(app: &Router, path: &str, token: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::get(path)
                .header(AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Send a POST request with a JSON body and a bearer token.
pub async fn post_json(
    app: &Router,
    path: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::post(path)
                .header(AUTHORIZATION, format!("Bearer {token}"))
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Send a PUT request with a JSON body and a bearer token.
pub async fn put_json(
    app: &Router,
    path: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::put(path)
                .header(AUTHORIZATION, format!("Bearer {token}"))
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Read a response body as text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Create an event (with an empty catering record) through the API,
/// returning its id.
pub async fn create_event_with_catering(app: &Router, token: &str) -> i64 {
    let response = post_json(
        app,
        "/api/v1/events",
        token,
        serde_json::json!({
            "title": "Fall Policy Mixer",
            "event_date": "2026-10-01",
            "catering": { "vendor": "Campus Catering", "estimated_cost": 250.0 }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["id"].as_i64().expect("event id")
}

/// Count `email_logs` rows matching a reason.
pub async fn count_emails_with_reason(pool: &PgPool, reason: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM email_logs WHERE reason = $1")
        .bind(reason)
        .fetch_one(pool)
        .await
        .unwrap()
}
