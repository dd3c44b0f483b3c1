//! Event lifecycle handlers: creation (with sub-workflow bootstrap),
//! partial update, the permissive status setter, retrospective, archive,
//! and soft delete.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use lchub_core::error::CoreError;
use lchub_core::event_status::{validate_target_status, EventStatus};
use lchub_core::flyer::FlyerStatus;
use lchub_core::types::DbId;
use lchub_db::models::catering::{CateringApproval, UpdateCateringDetails};
use lchub_db::models::checklist::ChecklistItem;
use lchub_db::models::event::{CreateEvent, Event, Retrospective, UpdateEvent};
use lchub_db::models::expense::Expense;
use lchub_db::models::flyer::{FlyerTask, UpdateFlyerTask};
use lchub_db::models::room::{RoomReservation, UpdateRoomReservation};
use lchub_db::repositories::{
    AcademicYearRepo, CateringRepo, ChecklistRepo, EventRepo, ExpenseRepo, FlyerRepo, RoomRepo,
};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

use super::room::room_confirmed_at;

/// Default day-of checklist seeded for every new event.
const DEFAULT_CHECKLIST_ITEMS: &[&str] = &[
    "Confirm room/venue is unlocked and set up",
    "Test A/V equipment (mic, projector, screen)",
    "Set up catering / food display",
    "Print and post directional signage",
    "Prepare sign-in sheet or QR code",
    "Greet and brief speaker",
    "Assign door greeter / welcome person",
    "Take event photos",
    "Collect attendee headcount",
    "Clean up after event",
];

/// Look up a live event or fail with `NotFound`.
pub async fn ensure_event_exists(
    pool: &lchub_db::DbPool,
    event_id: DbId,
) -> Result<Event, AppError> {
    EventRepo::find_by_id(pool, event_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id: event_id,
        }))
}

/// Request body for event creation. Optional sub-workflow payloads
/// bootstrap the 1:1 records in the same request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub description: Option<String>,
    pub event_date: NaiveDate,
    pub start_time: Option<String>,
    pub location: Option<String>,
    pub semester: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub budget_amount: Option<f64>,
    pub catering: Option<UpdateCateringDetails>,
    pub room: Option<UpdateRoomReservation>,
    pub flyer: Option<UpdateFlyerTask>,
}

/// Full event detail: the event plus everything hanging off it.
#[derive(Debug, Serialize)]
pub struct EventDetail {
    pub event: Event,
    pub catering: Option<CateringApproval>,
    pub room: Option<RoomReservation>,
    pub flyer: Option<FlyerTask>,
    pub expenses: Vec<Expense>,
    pub checklist: Vec<ChecklistItem>,
}

/// POST /api/v1/events
///
/// Creates an event in `DRAFT`, bound to the current academic year if one
/// is set, bootstrapping any requested sub-workflow records and seeding
/// the default day-of checklist.
pub async fn create_event(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateEventRequest>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    // Validate sub-workflow payloads before any row is written.
    let room_confirmed = match &input.room {
        Some(room) => Some(room_confirmed_at(room.status.as_deref(), None)?),
        None => None,
    };
    if let Some(flyer) = &input.flyer {
        if let Some(status) = &flyer.design_status {
            FlyerStatus::parse(status).ok_or_else(|| {
                AppError::Core(CoreError::Validation(format!(
                    "Unknown flyer status '{status}'"
                )))
            })?;
        }
    }

    let current_year = AcademicYearRepo::current(&state.pool).await?;

    let event = EventRepo::create(
        &state.pool,
        &CreateEvent {
            title: input.title,
            description: input.description,
            event_date: input.event_date,
            start_time: input.start_time,
            location: input.location,
            semester: input.semester,
            tags: input.tags.join(","),
            budget_amount: input.budget_amount,
            academic_year_id: current_year.map(|y| y.id),
            created_by_id: auth.user_id,
        },
    )
    .await?;

    if let Some(catering) = &input.catering {
        CateringRepo::create_for_event(&state.pool, event.id, catering).await?;
    }
    if let Some(room) = &input.room {
        RoomRepo::create(&state.pool, event.id, room, room_confirmed.flatten()).await?;
    }
    if let Some(flyer) = &input.flyer {
        FlyerRepo::create(&state.pool, event.id, flyer).await?;
    }
    ChecklistRepo::seed_defaults(&state.pool, event.id, DEFAULT_CHECKLIST_ITEMS).await?;

    tracing::info!(event_id = event.id, user_id = auth.user_id, "Event created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

/// Query parameters for the event listing.
#[derive(Debug, Deserialize)]
pub struct ListEventsQuery {
    pub academic_year_id: Option<DbId>,
}

/// GET /api/v1/events
pub async fn list_events(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListEventsQuery>,
) -> AppResult<impl IntoResponse> {
    let events = EventRepo::list(&state.pool, query.academic_year_id).await?;
    Ok(Json(DataResponse { data: events }))
}

/// GET /api/v1/events/{id}
///
/// Returns the event with its sub-workflow records, expenses, and
/// checklist.
pub async fn get_event(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let event = ensure_event_exists(&state.pool, event_id).await?;

    let detail = EventDetail {
        catering: CateringRepo::find_by_event(&state.pool, event_id).await?,
        room: RoomRepo::find_by_event(&state.pool, event_id).await?,
        flyer: FlyerRepo::find_by_event(&state.pool, event_id).await?,
        expenses: ExpenseRepo::list_for_event(&state.pool, event_id).await?,
        checklist: ChecklistRepo::list_for_event(&state.pool, event_id).await?,
        event,
    };

    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/events/{id}
///
/// Partial field update; absent fields stay untouched.
pub async fn update_event(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(input): Json<UpdateEvent>,
) -> AppResult<impl IntoResponse> {
    let event = EventRepo::update_fields(&state.pool, event_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id: event_id,
        }))?;
    Ok(Json(DataResponse { data: event }))
}

/// Request body for the status setter.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// PUT /api/v1/events/{id}/status
///
/// The permissive lifecycle setter: any authenticated actor may move the
/// event to any known state.
pub async fn update_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<impl IntoResponse> {
    let target = validate_target_status(&input.status)
        .map_err(|e| AppError::Core(CoreError::Validation(e)))?;

    let event = EventRepo::update_status(&state.pool, event_id, target.as_str())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id: event_id,
        }))?;

    tracing::info!(event_id, user_id = auth.user_id, status = target.as_str(), "Event status set");

    Ok(Json(DataResponse { data: event }))
}

/// POST /api/v1/events/{id}/retrospective
///
/// Records the retrospective and forces `COMPLETED` in one atomic update.
pub async fn update_retrospective(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(input): Json<Retrospective>,
) -> AppResult<impl IntoResponse> {
    let event = EventRepo::set_retrospective(&state.pool, event_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id: event_id,
        }))?;
    Ok(Json(DataResponse { data: event }))
}

/// POST /api/v1/events/{id}/archive
pub async fn archive_event(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let event = EventRepo::update_status(&state.pool, event_id, EventStatus::Archived.as_str())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id: event_id,
        }))?;

    tracing::info!(event_id, user_id = auth.user_id, "Event archived");

    Ok(Json(DataResponse { data: event }))
}

/// DELETE /api/v1/events/{id}
///
/// Soft delete: the row is retained with `deleted_at` set.
pub async fn delete_event(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = EventRepo::soft_delete(&state.pool, event_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id: event_id,
        }));
    }

    tracing::info!(event_id, user_id = auth.user_id, "Event soft-deleted");

    Ok(StatusCode::NO_CONTENT)
}
