//! External-scheduler hook for the reminder sweep.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::background::reminders::run_reminder_sweep;
use crate::error::AppResult;
use crate::state::AppState;

/// Response body for the sweep trigger.
#[derive(Debug, Serialize)]
pub struct SweepResponse {
    pub reminders: u64,
}

/// GET /api/v1/reminders/run
///
/// Runs one reminder sweep and reports how many reminders went out.
/// Idempotent: each reminded task is stamped, so repeated invocations
/// (including overlapping ones from an over-eager scheduler) do not
/// duplicate reminders.
pub async fn run_sweep(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let reminders = run_reminder_sweep(&state.pool, &state.notifier).await?;
    Ok(Json(SweepResponse { reminders }))
}
