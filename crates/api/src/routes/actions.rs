//! Route definitions for the one-click decision endpoint.

use axum::routing::get;
use axum::Router;

use crate::handlers::actions;
use crate::state::AppState;

/// Routes mounted at `/actions`.
///
/// Public: the single-use token in the query string is the credential.
///
/// ```text
/// GET /actions?token=... -> resolve_action (HTML response)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/actions", get(actions::resolve_action))
}
