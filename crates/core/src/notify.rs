//! Notification reasons, delivery statuses, and dedupe keys.
//!
//! A dedupe key identifies "this exact notification" -- reason, event,
//! workflow discriminator, recipient -- so that concurrent or retried
//! triggers produce at most one email of a given kind per recipient per
//! event within the rolling window. Keys are matched against the
//! `email_logs` audit table; the window is a trailing 24 hours.

use crate::assignment::TaskKind;
use crate::types::{DbId, Timestamp};

/// Trailing window within which a matching dedupe key suppresses a send.
pub const DEDUPE_WINDOW_HOURS: i64 = 24;

// ---------------------------------------------------------------------------
// Reasons and statuses
// ---------------------------------------------------------------------------

/// A catering request entered `AWAITING_APPROVAL`.
pub const REASON_APPROVAL_REQUEST: &str = "APPROVAL_REQUEST";

/// An approved catering order needs payment processing.
pub const REASON_PAYMENT_REQUEST: &str = "PAYMENT_REQUEST";

/// A lead was assigned a sub-workflow task.
pub const REASON_TASK_ASSIGNMENT: &str = "TASK_ASSIGNMENT";

/// An assigned task has sat unaccepted past the staleness window.
pub const REASON_TASK_REMINDER: &str = "TASK_REMINDER";

/// Delivery succeeded (or ran in dry mode).
pub const STATUS_SENT: &str = "SENT";

/// The transport reported a failure; the triggering operation proceeds.
pub const STATUS_FAILED: &str = "FAILED";

// ---------------------------------------------------------------------------
// Dedupe keys
// ---------------------------------------------------------------------------

/// Key for a task-assignment notification.
pub fn task_assignment_key(event_id: DbId, kind: TaskKind, assignee_id: DbId) -> String {
    format!("task_assign:{event_id}:{}:{assignee_id}", kind.as_str())
}

/// Key for an approval-request notification to one finance user.
pub fn approval_request_key(event_id: DbId, recipient_id: DbId) -> String {
    format!("approval_request:{event_id}:AWAITING_APPROVAL:{recipient_id}")
}

/// Key for a payment-request notification to one payment processor.
///
/// Deliberately carries no workflow discriminator: the explicit
/// request-payment call and the automatic one fired by an approval must
/// collapse into a single send.
pub fn payment_request_key(event_id: DbId, recipient_id: DbId) -> String {
    format!("payment_request:{event_id}:{recipient_id}")
}

/// Key for a task-reminder notification.
pub fn task_reminder_key(event_id: DbId, kind: TaskKind, assignee_id: DbId) -> String {
    format!("task_reminder:{event_id}:{}:{assignee_id}", kind.as_str())
}

/// Whether a previous send at `last_sent` still suppresses a new one at
/// `now`.
pub fn within_dedupe_window(last_sent: Timestamp, now: Timestamp) -> bool {
    last_sent > now - chrono::Duration::hours(DEDUPE_WINDOW_HOURS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_key_shapes() {
        assert_eq!(
            task_assignment_key(12, TaskKind::Room, 5),
            "task_assign:12:room:5"
        );
        assert_eq!(
            approval_request_key(12, 9),
            "approval_request:12:AWAITING_APPROVAL:9"
        );
        assert_eq!(payment_request_key(12, 9), "payment_request:12:9");
        assert_eq!(
            task_reminder_key(12, TaskKind::Catering, 5),
            "task_reminder:12:catering:5"
        );
    }

    #[test]
    fn test_keys_distinguish_recipients_and_kinds() {
        assert_ne!(
            task_assignment_key(1, TaskKind::Room, 2),
            task_assignment_key(1, TaskKind::Flyer, 2)
        );
        assert_ne!(
            task_assignment_key(1, TaskKind::Room, 2),
            task_assignment_key(1, TaskKind::Room, 3)
        );
    }

    #[test]
    fn test_window_suppresses_within_24h() {
        let now = Utc::now();
        assert!(within_dedupe_window(now - Duration::hours(23), now));
        assert!(!within_dedupe_window(now - Duration::hours(25), now));
    }
}
