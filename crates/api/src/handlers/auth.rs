//! Login handler issuing JWT access tokens.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use lchub_core::error::CoreError;
use lchub_db::models::user::UserResponse;
use lchub_db::repositories::UserRepo;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response body: a bearer token plus the authenticated user.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

/// POST /api/v1/auth/login
///
/// Verifies credentials and returns a signed access token. Login failures
/// are indistinguishable between unknown email and wrong password.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthenticated("Invalid email or password".into()))
        })?;

    let ok = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !ok {
        return Err(AppError::Core(CoreError::Unauthenticated(
            "Invalid email or password".into(),
        )));
    }

    let token = generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(LoginResponse {
        token,
        user: user.into(),
    }))
}
