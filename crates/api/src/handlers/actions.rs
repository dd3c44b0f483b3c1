//! One-click email decision endpoint.
//!
//! Resolves a single-use action token: lookup, used check, expiry check,
//! then an atomic consume (compare-and-set on `used_at`) *before* the
//! decision side effect runs, so two concurrent resolutions of the same
//! token apply the side effect at most once. Responses are small HTML
//! pages because the link is opened from an email, outside any session.

use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use chrono::Utc;
use serde::Deserialize;

use lchub_core::catering::CateringDecision;
use lchub_core::token::{validate_for_use, TokenError, TokenType};
use lchub_core::types::DbId;
use lchub_db::repositories::{ActionTokenRepo, CateringRepo, EventRepo};

use crate::error::AppResult;
use crate::state::AppState;

/// Query parameters for the decision link.
#[derive(Debug, Deserialize)]
pub struct ActionQuery {
    pub token: Option<String>,
}

/// GET /api/v1/actions?token=...
///
/// Public by design: the token is the credential. A missing token
/// redirects to the app's login surface.
pub async fn resolve_action(
    State(state): State<AppState>,
    Query(query): Query<ActionQuery>,
) -> AppResult<Response> {
    let app_url = &state.config.app_url;

    let Some(token) = query.token else {
        return Ok(Redirect::to(&format!("{app_url}/login")).into_response());
    };

    let Some(record) = ActionTokenRepo::find_by_token(&state.pool, &token).await? else {
        return Ok(page("Invalid Link", TokenError::NotFound.to_string(), app_url, None));
    };

    if let Err(e) = validate_for_use(record.used_at, record.expires_at, Utc::now()) {
        let title = match e {
            TokenError::AlreadyUsed => "Already Used",
            TokenError::Expired => "Link Expired",
            TokenError::NotFound => "Invalid Link",
        };
        return Ok(page(title, e.to_string(), app_url, None));
    }

    // Consume before acting: a lost race means another resolver already
    // applied (or is applying) the side effect.
    if !ActionTokenRepo::mark_used(&state.pool, record.id).await? {
        return Ok(page(
            "Already Used",
            TokenError::AlreadyUsed.to_string(),
            app_url,
            None,
        ));
    }

    let Some(token_type) = TokenType::parse(&record.token_type) else {
        return Ok(page(
            "Unknown Action",
            "This action type is not recognized.".to_string(),
            app_url,
            None,
        ));
    };

    let Some(event) = EventRepo::find_by_id(&state.pool, record.event_id).await? else {
        return Ok(page(
            "Event Not Found",
            "The event behind this action no longer exists.".to_string(),
            app_url,
            None,
        ));
    };

    let decision = token_type.decision();
    let notes = None; // one-click links carry no free-text notes
    CateringRepo::apply_decision(
        &state.pool,
        event.id,
        decision.as_status().as_str(),
        record.user_id,
        notes,
    )
    .await?;

    tracing::info!(
        event_id = event.id,
        user_id = record.user_id,
        decision = decision.as_status().as_str(),
        "Catering decided via action token"
    );

    let (title, message) = match decision {
        CateringDecision::Approved => {
            // Approval couples into the payment axis, same as in-app.
            CateringRepo::set_payment_requested(&state.pool, event.id).await?;
            state
                .notifier
                .send_payment_request(&state.pool, &event)
                .await?;
            (
                "Approved",
                format!(
                    "Catering for \"{}\" has been approved. A payment request has been sent to the payment admin.",
                    event.title
                ),
            )
        }
        CateringDecision::Rejected => (
            "Rejected",
            format!(
                "Catering for \"{}\" has been rejected. The event champion will be notified.",
                event.title
            ),
        ),
        CateringDecision::ChangesRequested => (
            "Changes Requested",
            format!(
                "You've requested changes for \"{}\". The event champion will revise and resubmit.",
                event.title
            ),
        ),
    };

    Ok(page(title, message, app_url, Some(event.id)))
}

/// Render the confirmation page shown after following an action link.
fn page(title: &str, message: String, app_url: &str, event_id: Option<DbId>) -> Response {
    let link = match event_id {
        Some(id) => format!("<a href=\"{app_url}/events/{id}\">View Event</a>"),
        None => format!("<a href=\"{app_url}\">Go to Dashboard</a>"),
    };
    let html = format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
           <meta charset=\"utf-8\" />\n\
           <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n\
           <title>{title} - LC Ops Hub</title>\n\
           <style>\n\
             body {{ font-family: sans-serif; display: flex; align-items: center; justify-content: center; min-height: 100vh; margin: 0; }}\n\
             .card {{ border: 1px solid #ddd; border-radius: 12px; padding: 40px; max-width: 480px; text-align: center; }}\n\
           </style>\n\
         </head>\n\
         <body>\n\
           <div class=\"card\">\n\
             <h1>{title}</h1>\n\
             <p>{message}</p>\n\
             <p>{link}</p>\n\
           </div>\n\
         </body>\n\
         </html>\n"
    );
    Html(html).into_response()
}
