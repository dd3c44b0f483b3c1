//! Email log entity model and DTOs.

use lchub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `email_logs` table: one notification attempt, sent or
/// failed. Also serves as the dedupe index via `dedupe_key`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EmailLog {
    pub id: DbId,
    pub to_email: String,
    pub subject: String,
    pub reason: String,
    pub status: String,
    pub event_id: Option<DbId>,
    pub recipient_id: Option<DbId>,
    pub dedupe_key: Option<String>,
    pub sent_at: Timestamp,
}

/// DTO for appending a log row.
#[derive(Debug, Clone)]
pub struct CreateEmailLog {
    pub to_email: String,
    pub subject: String,
    pub reason: String,
    pub status: String,
    pub event_id: Option<DbId>,
    pub recipient_id: Option<DbId>,
    pub dedupe_key: Option<String>,
}
