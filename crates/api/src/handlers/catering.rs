//! Catering workflow handlers: detail update, submit-for-approval,
//! decision, payment request, and mark-paid.
//!
//! The approval and payment axes live on one record; every payment-axis
//! write revalidates the cross-axis invariant (payment only leaves
//! `PENDING` once the request is `APPROVED`).

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use lchub_core::catering::{
    self, CateringDecision, CateringStatus, PaymentStatus, DEFAULT_PAYMENT_NOTE,
};
use lchub_core::error::CoreError;
use lchub_core::types::DbId;
use lchub_db::models::catering::{CateringApproval, UpdateCateringDetails};
use lchub_db::repositories::CateringRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireFinance, RequirePaymentAdmin};
use crate::response::DataResponse;
use crate::state::AppState;

use super::events::ensure_event_exists;

/// Look up the catering record for an event or fail with `NotFound`.
async fn ensure_catering_exists(
    pool: &lchub_db::DbPool,
    event_id: DbId,
) -> Result<CateringApproval, AppError> {
    CateringRepo::find_by_event(pool, event_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CateringApproval",
            id: event_id,
        }))
}

/// Parse the stored approval status, treating an unknown value as an
/// internal error (the column is only ever written from the enum).
fn parse_status(record: &CateringApproval) -> Result<CateringStatus, AppError> {
    CateringStatus::parse(&record.status).ok_or_else(|| {
        AppError::InternalError(format!("Corrupt catering status '{}'", record.status))
    })
}

fn parse_payment_status(record: &CateringApproval) -> Result<PaymentStatus, AppError> {
    PaymentStatus::parse(&record.payment_status).ok_or_else(|| {
        AppError::InternalError(format!(
            "Corrupt payment status '{}'",
            record.payment_status
        ))
    })
}

/// PUT /api/v1/events/{id}/catering
///
/// Champion-editable detail fields. Editing does not change either status
/// axis; a record in `CHANGES_REQUESTED` is edited here and then
/// resubmitted.
pub async fn update_details(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(input): Json<UpdateCateringDetails>,
) -> AppResult<impl IntoResponse> {
    ensure_event_exists(&state.pool, event_id).await?;

    let record = CateringRepo::update_details(&state.pool, event_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CateringApproval",
            id: event_id,
        }))?;
    Ok(Json(DataResponse { data: record }))
}

/// POST /api/v1/events/{id}/catering/submit
///
/// Moves the record to `AWAITING_APPROVAL` and notifies finance
/// approvers. A resubmission after `CHANGES_REQUESTED` increments the
/// revision count exactly once for the cycle.
pub async fn submit_for_approval(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let event = ensure_event_exists(&state.pool, event_id).await?;
    let record = ensure_catering_exists(&state.pool, event_id).await?;

    let submission = catering::submit(parse_status(&record)?);
    let record = CateringRepo::submit(&state.pool, event_id, submission.revision_increment)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CateringApproval",
            id: event_id,
        }))?;

    state
        .notifier
        .send_approval_request(&state.pool, &event)
        .await?;

    tracing::info!(
        event_id,
        user_id = auth.user_id,
        revision_count = record.revision_count,
        "Catering submitted for approval"
    );

    Ok(Json(DataResponse { data: record }))
}

/// Request body for the decision endpoint.
#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    pub decision: CateringDecision,
    pub change_notes: Option<String>,
}

/// POST /api/v1/events/{id}/catering/decision
///
/// Finance only. Stamps the deciding actor and time; `change_notes` are
/// kept only for `CHANGES_REQUESTED`. Approving also raises the automatic
/// payment request. Deciding a record that is not awaiting approval
/// overwrites in place.
pub async fn decide(
    RequireFinance(user): RequireFinance,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(input): Json<DecisionRequest>,
) -> AppResult<impl IntoResponse> {
    let event = ensure_event_exists(&state.pool, event_id).await?;
    ensure_catering_exists(&state.pool, event_id).await?;

    let notes = catering::change_notes_for(input.decision, input.change_notes);
    let record = CateringRepo::apply_decision(
        &state.pool,
        event_id,
        input.decision.as_status().as_str(),
        user.user_id,
        notes.as_deref(),
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "CateringApproval",
        id: event_id,
    }))?;

    tracing::info!(
        event_id,
        user_id = user.user_id,
        decision = input.decision.as_status().as_str(),
        "Catering decision recorded"
    );

    // Approval couples into the payment axis: raise the payment request
    // whether or not the champion ever asks explicitly.
    let record = if input.decision == CateringDecision::Approved {
        request_payment_inner(&state, event_id, &event).await?
    } else {
        record
    };

    Ok(Json(DataResponse { data: record }))
}

/// POST /api/v1/events/{id}/catering/request-payment
///
/// Explicit champion-triggered payment request. Shares its dedupe key
/// with the automatic request fired by an approval, so at most one
/// notification per processor per day goes out even if both paths run.
pub async fn request_payment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let event = ensure_event_exists(&state.pool, event_id).await?;
    let record = ensure_catering_exists(&state.pool, event_id).await?;

    catering::validate_payment_transition(
        parse_status(&record)?,
        parse_payment_status(&record)?,
        PaymentStatus::Requested,
    )
    .map_err(|e| AppError::Core(CoreError::Conflict(e)))?;

    let record = request_payment_inner(&state, event_id, &event).await?;

    tracing::info!(event_id, user_id = auth.user_id, "Payment requested");

    Ok(Json(DataResponse { data: record }))
}

/// Shared payment-request path: flip the axis, notify processors.
async fn request_payment_inner(
    state: &AppState,
    event_id: DbId,
    event: &lchub_db::models::event::Event,
) -> Result<CateringApproval, AppError> {
    let record = CateringRepo::set_payment_requested(&state.pool, event_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CateringApproval",
            id: event_id,
        }))?;

    state.notifier.send_payment_request(&state.pool, event).await?;
    Ok(record)
}

/// Request body for mark-paid.
#[derive(Debug, Default, Deserialize)]
pub struct MarkPaidRequest {
    pub payment_note: Option<String>,
}

/// POST /api/v1/events/{id}/catering/mark-paid
///
/// Payment admin (or finance) only. Stamps the payer and time; the note
/// defaults to "Done".
pub async fn mark_paid(
    RequirePaymentAdmin(user): RequirePaymentAdmin,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(input): Json<MarkPaidRequest>,
) -> AppResult<impl IntoResponse> {
    ensure_event_exists(&state.pool, event_id).await?;
    let record = ensure_catering_exists(&state.pool, event_id).await?;

    catering::validate_payment_transition(
        parse_status(&record)?,
        parse_payment_status(&record)?,
        PaymentStatus::Paid,
    )
    .map_err(|e| AppError::Core(CoreError::Conflict(e)))?;

    let note = input
        .payment_note
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| DEFAULT_PAYMENT_NOTE.to_string());

    let record = CateringRepo::mark_paid(&state.pool, event_id, user.user_id, &note)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CateringApproval",
            id: event_id,
        }))?;

    tracing::info!(event_id, user_id = user.user_id, "Catering marked paid");

    Ok(Json(DataResponse { data: record }))
}
