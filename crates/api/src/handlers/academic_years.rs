//! Academic year handlers: listing, creation, settings, and the atomic
//! current-year switch.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use lchub_core::error::CoreError;
use lchub_core::types::DbId;
use lchub_db::models::academic_year::CreateAcademicYear;
use lchub_db::repositories::AcademicYearRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/academic-years
pub async fn list_years(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let years = AcademicYearRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: years }))
}

/// Request body for creating an academic year.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateYearRequest {
    /// Display label; defaults to `"{start_year}-{end_year}"`.
    pub label: Option<String>,
    /// First month of the year (1-12); defaults to September.
    #[validate(range(min = 1, max = 12))]
    pub start_month: Option<i32>,
    pub start_year: i32,
    pub budget: Option<f64>,
    /// Make this the current year on creation.
    #[serde(default)]
    pub is_current: bool,
}

/// POST /api/v1/academic-years
///
/// Derives the end month/year from the start: the year runs for twelve
/// months, wrapping into the next calendar year unless it starts in
/// January.
pub async fn create_year(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateYearRequest>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let start_month = input.start_month.unwrap_or(9);
    let (end_month, end_year) = if start_month == 1 {
        (12, input.start_year)
    } else {
        (start_month - 1, input.start_year + 1)
    };
    let label = input
        .label
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| format!("{}-{}", input.start_year, end_year));

    let year = AcademicYearRepo::create(
        &state.pool,
        &CreateAcademicYear {
            label,
            start_month,
            start_year: input.start_year,
            end_month,
            end_year,
            budget: input.budget,
            is_current: input.is_current,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: year })))
}

/// Request body for year settings.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateYearRequest {
    #[validate(range(min = 1, max = 12))]
    pub start_month: Option<i32>,
    pub budget: Option<f64>,
}

/// PUT /api/v1/academic-years/{id}
pub async fn update_year(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(year_id): Path<DbId>,
    Json(input): Json<UpdateYearRequest>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let year = AcademicYearRepo::update_settings(&state.pool, year_id, input.start_month, input.budget)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AcademicYear",
            id: year_id,
        }))?;
    Ok(Json(DataResponse { data: year }))
}

/// POST /api/v1/academic-years/{id}/switch
///
/// Atomically makes this the single current year (clear all, set one).
pub async fn switch_year(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(year_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let year = AcademicYearRepo::switch_current(&state.pool, year_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AcademicYear",
            id: year_id,
        }))?;

    tracing::info!(year_id, user_id = auth.user_id, "Current academic year switched");

    Ok(Json(DataResponse { data: year }))
}
