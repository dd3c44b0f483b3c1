//! Task assignment & acceptance handlers, uniform across the three
//! sub-workflows.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use lchub_core::assignment::{validate_acceptor, validate_assignee_role, TaskKind};
use lchub_core::error::CoreError;
use lchub_core::types::DbId;
use lchub_db::repositories::{CateringRepo, FlyerRepo, RoomRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

use super::events::ensure_event_exists;

fn parse_kind(kind: &str) -> Result<TaskKind, AppError> {
    TaskKind::parse(kind).ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!("Unknown task kind '{kind}'")))
    })
}

fn to_json<T: serde::Serialize>(record: T) -> Result<serde_json::Value, AppError> {
    serde_json::to_value(record).map_err(|e| AppError::InternalError(e.to_string()))
}

/// Request body for assignment.
#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    pub assignee_id: DbId,
}

/// POST /api/v1/events/{id}/tasks/{kind}/assign
///
/// Assigns a lead to a sub-workflow, creating the record if it does not
/// exist yet. Every assignment (including reassignment) nulls
/// `accepted_at` and `reminder_sent_at`, then notifies the new assignee.
pub async fn assign_task(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((event_id, kind)): Path<(DbId, String)>,
    Json(input): Json<AssignRequest>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_kind(&kind)?;
    let event = ensure_event_exists(&state.pool, event_id).await?;

    let assignee = UserRepo::find_by_id(&state.pool, input.assignee_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: input.assignee_id,
        }))?;
    validate_assignee_role(&assignee.role)?;

    let data = match kind {
        TaskKind::Catering => {
            let record = match CateringRepo::assign(&state.pool, event_id, assignee.id).await? {
                Some(record) => record,
                None => CateringRepo::create_with_assignee(&state.pool, event_id, assignee.id).await?,
            };
            to_json(record)?
        }
        TaskKind::Room => {
            let record = match RoomRepo::assign(&state.pool, event_id, assignee.id).await? {
                Some(record) => record,
                None => RoomRepo::create_with_assignee(&state.pool, event_id, assignee.id).await?,
            };
            to_json(record)?
        }
        TaskKind::Flyer => {
            let record = match FlyerRepo::assign(&state.pool, event_id, assignee.id).await? {
                Some(record) => record,
                None => FlyerRepo::create_with_assignee(&state.pool, event_id, assignee.id).await?,
            };
            to_json(record)?
        }
    };

    state
        .notifier
        .send_task_assignment(&state.pool, &event, kind, &assignee)
        .await?;

    tracing::info!(
        event_id,
        user_id = auth.user_id,
        assignee_id = assignee.id,
        kind = kind.as_str(),
        "Task assigned"
    );

    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/events/{id}/tasks/{kind}/accept
///
/// Acceptance is a protocol-level invariant: only the current assignee
/// may accept. Rooms additionally advance to `ACCEPTED`.
pub async fn accept_task(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((event_id, kind)): Path<(DbId, String)>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_kind(&kind)?;
    ensure_event_exists(&state.pool, event_id).await?;

    let not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: "Task",
            id: event_id,
        })
    };

    let data = match kind {
        TaskKind::Catering => {
            let record = CateringRepo::find_by_event(&state.pool, event_id)
                .await?
                .ok_or_else(not_found)?;
            validate_acceptor(auth.user_id, record.assignee_id)?;
            to_json(
                CateringRepo::accept(&state.pool, event_id)
                    .await?
                    .ok_or_else(not_found)?,
            )?
        }
        TaskKind::Room => {
            let record = RoomRepo::find_by_event(&state.pool, event_id)
                .await?
                .ok_or_else(not_found)?;
            validate_acceptor(auth.user_id, record.assignee_id)?;
            to_json(
                RoomRepo::accept(&state.pool, event_id)
                    .await?
                    .ok_or_else(not_found)?,
            )?
        }
        TaskKind::Flyer => {
            let record = FlyerRepo::find_by_event(&state.pool, event_id)
                .await?
                .ok_or_else(not_found)?;
            validate_acceptor(auth.user_id, record.assignee_id)?;
            to_json(
                FlyerRepo::accept(&state.pool, event_id)
                    .await?
                    .ok_or_else(not_found)?,
            )?
        }
    };

    tracing::info!(event_id, user_id = auth.user_id, kind = kind.as_str(), "Task accepted");

    Ok(Json(DataResponse { data }))
}
