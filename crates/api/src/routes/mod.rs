//! Route tree.

pub mod academic_years;
pub mod actions;
pub mod auth;
pub mod checklist;
pub mod events;
pub mod expenses;
pub mod health;
pub mod reminders;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                  login (public)
///
/// /users                                       list (GET), create (POST, admin)
///
/// /events                                      list, create
/// /events/{id}                                 get, update, soft delete
/// /events/{id}/status                          permissive lifecycle setter (PUT)
/// /events/{id}/retrospective                   record retrospective + complete (POST)
/// /events/{id}/archive                         archive (POST)
/// /events/{id}/catering                        update details (PUT)
/// /events/{id}/catering/submit                 submit for approval (POST)
/// /events/{id}/catering/decision               decide (POST, finance)
/// /events/{id}/catering/request-payment        request payment (POST)
/// /events/{id}/catering/mark-paid              mark paid (POST, payment admin)
/// /events/{id}/room                            upsert reservation (PUT)
/// /events/{id}/flyer                           upsert flyer task (PUT)
/// /events/{id}/tasks/{kind}/assign             assign lead (POST)
/// /events/{id}/tasks/{kind}/accept             accept task (POST)
/// /events/{id}/expenses                        add expense (POST)
/// /events/{id}/checklist                       add checklist item (POST)
///
/// /expenses/{id}                               delete (DELETE)
/// /expenses/{id}/toggle-paid                   toggle (POST)
/// /checklist/{id}/toggle                       toggle (POST)
///
/// /academic-years                              list, create
/// /academic-years/{id}                         update settings (PUT)
/// /academic-years/{id}/switch                  make current (POST)
///
/// /actions?token=...                           one-click decision (GET, public)
/// /reminders/run                               reminder sweep trigger (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(users::router())
        .merge(events::router())
        .merge(expenses::router())
        .merge(checklist::router())
        .merge(academic_years::router())
        .merge(actions::router())
        .merge(reminders::router())
}
