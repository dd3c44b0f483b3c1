//! Capability-gating extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does
//! not carry the required capability. Capabilities are defined in
//! `lchub_core::roles` so the domain rules live in one place.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use lchub_core::error::CoreError;
use lchub_core::roles;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != roles::ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires the financial-approval capability (finance or admin).
///
/// ```ignore
/// async fn decide(RequireFinance(user): RequireFinance) -> AppResult<Json<()>> {
///     // user may decide catering approvals here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireFinance(pub AuthUser);

impl FromRequestParts<AppState> for RequireFinance {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !roles::can_decide_catering(&user.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Financial approver role required".into(),
            )));
        }
        Ok(RequireFinance(user))
    }
}

/// Requires the payment-processing capability (payment admin, finance, or
/// admin).
pub struct RequirePaymentAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequirePaymentAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !roles::can_mark_paid(&user.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Payment admin role required".into(),
            )));
        }
        Ok(RequirePaymentAdmin(user))
    }
}
