//! Route definitions for the `/academic-years` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::academic_years;
use crate::state::AppState;

/// Routes mounted at `/academic-years`.
///
/// ```text
/// GET  /academic-years             -> list_years
/// POST /academic-years             -> create_year
/// PUT  /academic-years/{id}        -> update_year
/// POST /academic-years/{id}/switch -> switch_year
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/academic-years",
            get(academic_years::list_years).post(academic_years::create_year),
        )
        .route("/academic-years/{id}", put(academic_years::update_year))
        .route(
            "/academic-years/{id}/switch",
            post(academic_years::switch_year),
        )
}
