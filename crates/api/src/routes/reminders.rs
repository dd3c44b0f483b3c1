//! Route definitions for the reminder sweep trigger.

use axum::routing::get;
use axum::Router;

use crate::handlers::reminders;
use crate::state::AppState;

/// Routes mounted at `/reminders`.
///
/// Intended for invocation by an external scheduler (e.g. a daily cron);
/// idempotent, so overlapping invocations are safe.
///
/// ```text
/// GET /reminders/run -> run_sweep
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/reminders/run", get(reminders::run_sweep))
}
