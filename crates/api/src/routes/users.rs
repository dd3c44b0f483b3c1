//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET  /users  -> list_users (defaults to leads, for the assignment picker)
/// POST /users  -> create_user (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/users", get(users::list_users).post(users::create_user))
}
