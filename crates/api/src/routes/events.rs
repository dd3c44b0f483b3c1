//! Route definitions for the `/events` resource and its nested
//! sub-workflow operations.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{catering, checklist, events, expenses, flyer, room, tasks};
use crate::state::AppState;

/// Routes mounted at `/events`.
///
/// ```text
/// GET    /                                   -> list_events
/// POST   /                                   -> create_event
/// GET    /{id}                               -> get_event
/// PUT    /{id}                               -> update_event
/// DELETE /{id}                               -> delete_event (soft)
/// PUT    /{id}/status                        -> update_status
/// POST   /{id}/retrospective                 -> update_retrospective
/// POST   /{id}/archive                       -> archive_event
///
/// PUT    /{id}/catering                      -> update_details
/// POST   /{id}/catering/submit               -> submit_for_approval
/// POST   /{id}/catering/decision             -> decide (finance)
/// POST   /{id}/catering/request-payment      -> request_payment
/// POST   /{id}/catering/mark-paid            -> mark_paid (payment admin)
///
/// PUT    /{id}/room                          -> update_reservation
/// PUT    /{id}/flyer                         -> update_flyer_task
///
/// POST   /{id}/tasks/{kind}/assign           -> assign_task
/// POST   /{id}/tasks/{kind}/accept           -> accept_task
///
/// POST   /{id}/expenses                      -> add_expense
/// POST   /{id}/checklist                     -> add_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events", get(events::list_events).post(events::create_event))
        .route(
            "/events/{id}",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        .route("/events/{id}/status", put(events::update_status))
        .route(
            "/events/{id}/retrospective",
            post(events::update_retrospective),
        )
        .route("/events/{id}/archive", post(events::archive_event))
        // Catering workflow
        .route("/events/{id}/catering", put(catering::update_details))
        .route(
            "/events/{id}/catering/submit",
            post(catering::submit_for_approval),
        )
        .route("/events/{id}/catering/decision", post(catering::decide))
        .route(
            "/events/{id}/catering/request-payment",
            post(catering::request_payment),
        )
        .route("/events/{id}/catering/mark-paid", post(catering::mark_paid))
        // Room / flyer upserts
        .route("/events/{id}/room", put(room::update_reservation))
        .route("/events/{id}/flyer", put(flyer::update_flyer_task))
        // Task assignment protocol
        .route("/events/{id}/tasks/{kind}/assign", post(tasks::assign_task))
        .route("/events/{id}/tasks/{kind}/accept", post(tasks::accept_task))
        // Event-owned flat records
        .route("/events/{id}/expenses", post(expenses::add_expense))
        .route("/events/{id}/checklist", post(checklist::add_item))
}
