//! Day-of checklist handlers: append a custom item, toggle an item.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use lchub_core::error::CoreError;
use lchub_core::types::DbId;
use lchub_db::repositories::ChecklistRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

use super::events::ensure_event_exists;

/// Request body for adding a custom item.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub label: String,
}

/// POST /api/v1/events/{id}/checklist
pub async fn add_item(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(input): Json<AddItemRequest>,
) -> AppResult<impl IntoResponse> {
    ensure_event_exists(&state.pool, event_id).await?;

    if input.label.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "label must not be empty".into(),
        )));
    }

    let item = ChecklistRepo::add_custom(&state.pool, event_id, &input.label).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// Request body for toggling an item.
#[derive(Debug, Deserialize)]
pub struct ToggleItemRequest {
    pub checked: bool,
}

/// POST /api/v1/checklist/{id}/toggle
pub async fn toggle_item(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(item_id): Path<DbId>,
    Json(input): Json<ToggleItemRequest>,
) -> AppResult<impl IntoResponse> {
    let item = ChecklistRepo::set_checked(&state.pool, item_id, input.checked)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ChecklistItem",
            id: item_id,
        }))?;
    Ok(Json(DataResponse { data: item }))
}
