//! Task assignment & acceptance protocol, uniform across the three
//! sub-workflows.
//!
//! Assigning always resets `accepted_at` and `reminder_sent_at` so a
//! reassignment restarts the acceptance clock and re-arms the reminder.
//! Acceptance is enforced here at the protocol level: only the current
//! assignee may accept. There is no reject or unassign; reassignment is the
//! only undo.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::roles;
use crate::types::{DbId, Timestamp};

/// Days an assigned-but-unaccepted task may sit before the reminder sweep
/// picks it up.
pub const REMINDER_STALENESS_DAYS: i64 = 7;

/// The three assignable sub-workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Catering,
    Room,
    Flyer,
}

impl TaskKind {
    /// URL / dedupe-key segment.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Catering => "catering",
            TaskKind::Room => "room",
            TaskKind::Flyer => "flyer",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "catering" => Some(TaskKind::Catering),
            "room" => Some(TaskKind::Room),
            "flyer" => Some(TaskKind::Flyer),
            _ => None,
        }
    }

    /// Label used in notification subjects and bodies.
    pub fn label(&self) -> &'static str {
        match self {
            TaskKind::Catering => "Catering",
            TaskKind::Room => "Room Reservation",
            TaskKind::Flyer => "Flyer",
        }
    }
}

/// Validate an assignment candidate: only `lead` users may hold tasks.
pub fn validate_assignee_role(role: &str) -> Result<(), CoreError> {
    if roles::is_assignable(role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Only users with the '{}' role can be assigned tasks",
            roles::ROLE_LEAD
        )))
    }
}

/// Validate that the caller is the current assignee before acceptance.
pub fn validate_acceptor(caller_id: DbId, assignee_id: Option<DbId>) -> Result<(), CoreError> {
    match assignee_id {
        Some(id) if id == caller_id => Ok(()),
        Some(_) => Err(CoreError::Forbidden(
            "Only the assigned lead can accept this task".into(),
        )),
        None => Err(CoreError::Validation("Task has no assignee".into())),
    }
}

/// Staleness predicate for the reminder sweep.
///
/// A task is due a reminder when it has an assignee, has not been accepted,
/// has not already been reminded, was created more than
/// [`REMINDER_STALENESS_DAYS`] ago, and its workflow is not terminal.
/// `reminder_sent_at` is cleared on every reassignment, so a reassigned
/// task becomes eligible again after another full staleness window.
pub fn reminder_due(
    assignee_id: Option<DbId>,
    accepted_at: Option<Timestamp>,
    reminder_sent_at: Option<Timestamp>,
    created_at: Timestamp,
    workflow_terminal: bool,
    now: Timestamp,
) -> bool {
    assignee_id.is_some()
        && accepted_at.is_none()
        && reminder_sent_at.is_none()
        && !workflow_terminal
        && created_at < now - chrono::Duration::days(REMINDER_STALENESS_DAYS)
}

/// Convenience wrapper using the current time.
pub fn reminder_due_now(
    assignee_id: Option<DbId>,
    accepted_at: Option<Timestamp>,
    reminder_sent_at: Option<Timestamp>,
    created_at: Timestamp,
    workflow_terminal: bool,
) -> bool {
    reminder_due(
        assignee_id,
        accepted_at,
        reminder_sent_at,
        created_at,
        workflow_terminal,
        Utc::now(),
    )
}
