//! Room reservation upsert handler.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};

use lchub_core::error::CoreError;
use lchub_core::room::RoomStatus;
use lchub_core::types::DbId;
use lchub_db::models::room::UpdateRoomReservation;
use lchub_db::repositories::RoomRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

use super::events::ensure_event_exists;

/// Compute the `confirmed_at` stamp for an incoming status.
///
/// Moving to `CONFIRMED` stamps the current time if no earlier stamp
/// exists; any other status keeps whatever was there.
pub fn room_confirmed_at(
    status: Option<&str>,
    existing: Option<DateTime<Utc>>,
) -> Result<Option<DateTime<Utc>>, AppError> {
    let status = match status {
        Some(s) => RoomStatus::parse(s).ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!("Unknown room status '{s}'")))
        })?,
        None => return Ok(existing),
    };
    if status == RoomStatus::Confirmed {
        Ok(existing.or_else(|| Some(Utc::now())))
    } else {
        Ok(existing)
    }
}

/// PUT /api/v1/events/{id}/room
///
/// Upsert: creates the reservation when absent, otherwise replaces the
/// mutable fields while preserving identity and assignment history.
pub async fn update_reservation(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(input): Json<UpdateRoomReservation>,
) -> AppResult<impl IntoResponse> {
    ensure_event_exists(&state.pool, event_id).await?;

    let existing = RoomRepo::find_by_event(&state.pool, event_id).await?;

    let record = match existing {
        Some(existing) => {
            let confirmed_at = room_confirmed_at(input.status.as_deref(), existing.confirmed_at)?;
            RoomRepo::update(&state.pool, event_id, &input, confirmed_at)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "RoomReservation",
                    id: event_id,
                }))?
        }
        None => {
            let confirmed_at = room_confirmed_at(input.status.as_deref(), None)?;
            RoomRepo::create(&state.pool, event_id, &input, confirmed_at).await?
        }
    };

    Ok(Json(DataResponse { data: record }))
}
