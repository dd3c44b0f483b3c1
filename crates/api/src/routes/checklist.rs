//! Route definitions for standalone checklist operations.

use axum::routing::post;
use axum::Router;

use crate::handlers::checklist;
use crate::state::AppState;

/// Routes mounted at `/checklist`.
///
/// ```text
/// POST /checklist/{id}/toggle -> toggle_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/checklist/{id}/toggle", post(checklist::toggle_item))
}
