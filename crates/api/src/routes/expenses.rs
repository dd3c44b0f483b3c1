//! Route definitions for standalone expense operations.

use axum::routing::{delete, post};
use axum::Router;

use crate::handlers::expenses;
use crate::state::AppState;

/// Routes mounted at `/expenses`.
///
/// ```text
/// DELETE /expenses/{id}             -> delete_expense
/// POST   /expenses/{id}/toggle-paid -> toggle_expense_paid
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/expenses/{id}", delete(expenses::delete_expense))
        .route(
            "/expenses/{id}/toggle-paid",
            post(expenses::toggle_expense_paid),
        )
}
