//! Projection used by the reminder sweep.

use lchub_core::types::DbId;
use sqlx::FromRow;

/// A stale, unaccepted task joined with its event title and assignee
/// contact details. One shape serves all three sub-workflow tables.
#[derive(Debug, Clone, FromRow)]
pub struct ReminderCandidate {
    /// Primary key of the sub-workflow row (not the event).
    pub record_id: DbId,
    pub event_id: DbId,
    pub event_title: String,
    pub assignee_id: DbId,
    pub assignee_email: String,
    pub assignee_name: String,
}
