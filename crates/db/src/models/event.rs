//! Event entity model and DTOs.

use chrono::NaiveDate;
use lchub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub event_date: NaiveDate,
    pub start_time: Option<String>,
    pub location: Option<String>,
    pub semester: Option<String>,
    /// Comma-joined tag list.
    pub tags: String,
    pub status: String,
    pub budget_amount: Option<f64>,
    pub headcount: Option<i32>,
    pub do_again: Option<bool>,
    pub reinvite_speaker: Option<bool>,
    pub retrospective_notes: Option<String>,
    pub academic_year_id: Option<DbId>,
    pub created_by_id: DbId,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new event.
#[derive(Debug, Clone)]
pub struct CreateEvent {
    pub title: String,
    pub description: Option<String>,
    pub event_date: NaiveDate,
    pub start_time: Option<String>,
    pub location: Option<String>,
    pub semester: Option<String>,
    pub tags: String,
    pub budget_amount: Option<f64>,
    pub academic_year_id: Option<DbId>,
    pub created_by_id: DbId,
}

/// DTO for a partial event update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEvent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub location: Option<String>,
    pub semester: Option<String>,
    pub tags: Option<String>,
    pub budget_amount: Option<f64>,
    pub headcount: Option<i32>,
}

/// Retrospective fields recorded through the "complete" path. Applying a
/// retrospective forces the event status to `COMPLETED` in the same update.
#[derive(Debug, Clone, Deserialize)]
pub struct Retrospective {
    pub headcount: Option<i32>,
    pub do_again: Option<bool>,
    pub reinvite_speaker: Option<bool>,
    pub notes: Option<String>,
}
