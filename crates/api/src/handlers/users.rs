//! User listing (for the assignment picker) and admin user creation.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use lchub_core::error::CoreError;
use lchub_core::roles;
use lchub_db::models::user::{CreateUser, UserResponse};
use lchub_db::repositories::UserRepo;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the user listing.
#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    /// Restrict to one role; defaults to `lead` (the assignment picker).
    pub role: Option<String>,
}

/// GET /api/v1/users?role=lead
///
/// Lists active users by role, defaulting to assignable leads.
pub async fn list_users(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> AppResult<impl IntoResponse> {
    let role = query.role.as_deref().unwrap_or(roles::ROLE_LEAD);
    roles::validate_role(role).map_err(|e| AppError::Core(CoreError::Validation(e)))?;

    let users = UserRepo::list_active_by_roles(&state.pool, &[role]).await?;
    let users: Vec<UserResponse> = users.into_iter().map(Into::into).collect();
    Ok(Json(DataResponse { data: users }))
}

/// Request body for admin user creation.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    pub role: String,
}

/// POST /api/v1/users
///
/// Creates a user. Admin only.
pub async fn create_user(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    roles::validate_role(&input.role).map_err(|e| AppError::Core(CoreError::Validation(e)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: input.name,
            email: input.email,
            password_hash,
            role: input.role,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, role = %user.role, "User created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(user),
        }),
    ))
}
