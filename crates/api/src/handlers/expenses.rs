//! Expense handlers: add, delete, toggle-paid.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use lchub_core::error::CoreError;
use lchub_core::types::DbId;
use lchub_db::models::expense::CreateExpense;
use lchub_db::repositories::ExpenseRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

use super::events::ensure_event_exists;

/// POST /api/v1/events/{id}/expenses
pub async fn add_expense(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(input): Json<CreateExpense>,
) -> AppResult<impl IntoResponse> {
    ensure_event_exists(&state.pool, event_id).await?;

    if input.description.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "description must not be empty".into(),
        )));
    }

    let expense = ExpenseRepo::create(&state.pool, event_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: expense })))
}

/// DELETE /api/v1/expenses/{id}
pub async fn delete_expense(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(expense_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = ExpenseRepo::delete(&state.pool, expense_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Expense",
            id: expense_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/expenses/{id}/toggle-paid
///
/// Flips the paid flag; marking paid stamps `paid_date`, unmarking clears
/// it.
pub async fn toggle_expense_paid(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(expense_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let expense = ExpenseRepo::find_by_id(&state.pool, expense_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Expense",
            id: expense_id,
        }))?;

    let expense = ExpenseRepo::set_paid(&state.pool, expense_id, !expense.is_paid)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Expense",
            id: expense_id,
        }))?;
    Ok(Json(DataResponse { data: expense }))
}
