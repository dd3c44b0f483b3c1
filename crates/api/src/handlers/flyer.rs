//! Flyer task upsert handler.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use lchub_core::error::CoreError;
use lchub_core::flyer::FlyerStatus;
use lchub_core::types::DbId;
use lchub_db::models::flyer::UpdateFlyerTask;
use lchub_db::repositories::FlyerRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

use super::events::ensure_event_exists;

/// PUT /api/v1/events/{id}/flyer
///
/// Upsert: creates the flyer task when absent, otherwise replaces the
/// mutable fields while preserving identity and assignment history.
pub async fn update_flyer_task(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(input): Json<UpdateFlyerTask>,
) -> AppResult<impl IntoResponse> {
    ensure_event_exists(&state.pool, event_id).await?;

    if let Some(status) = &input.design_status {
        FlyerStatus::parse(status).ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "Unknown flyer status '{status}'"
            )))
        })?;
    }

    let existing = FlyerRepo::find_by_event(&state.pool, event_id).await?;

    let record = match existing {
        Some(_) => FlyerRepo::update(&state.pool, event_id, &input)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "FlyerTask",
                id: event_id,
            }))?,
        None => FlyerRepo::create(&state.pool, event_id, &input).await?,
    };

    Ok(Json(DataResponse { data: record }))
}
