//! Plain-text subject and body builders for every notification kind.
//!
//! Bodies are terse plain text: a greeting with the recipient's first
//! name, the event, and the relevant link(s). The one-click decision links
//! in the approval request carry single-use action tokens.

use lchub_core::types::DbId;

/// Footer appended to every message.
const FOOTER: &str = "--\nLC Ops Hub";

/// First name of a "First Last" display name.
fn first_name(name: &str) -> &str {
    name.split_whitespace().next().unwrap_or(name)
}

/// In-app event URL.
pub fn event_url(app_url: &str, event_id: DbId) -> String {
    format!("{app_url}/events/{event_id}")
}

/// One-click action URL for a decision token.
pub fn action_url(app_url: &str, token: &str) -> String {
    format!("{app_url}/api/v1/actions?token={token}")
}

/// A lead was assigned a task.
pub fn task_assignment(
    app_url: &str,
    event_id: DbId,
    event_title: &str,
    task_label: &str,
    assignee_name: &str,
) -> (String, String) {
    let subject = format!("[Assigned] {task_label} task: {event_title}");
    let body = format!(
        "Hi {},\n\n\
         You've been assigned to handle {task_label} for \"{event_title}\".\n\
         Please review the details and accept the task:\n\n\
         {}\n\n\
         {FOOTER}\n",
        first_name(assignee_name),
        event_url(app_url, event_id),
    );
    (subject, body)
}

/// A catering request awaits a finance decision. The three links apply the
/// decision directly; the last line points at the in-app review page.
pub fn approval_request(
    app_url: &str,
    event_id: DbId,
    event_title: &str,
    recipient_name: &str,
    approve_token: &str,
    reject_token: &str,
    changes_token: &str,
) -> (String, String) {
    let subject = format!("[Action Required] Catering approval: {event_title}");
    let body = format!(
        "Hi {},\n\n\
         A catering request for \"{event_title}\" needs your review.\n\n\
         Approve:          {}\n\
         Reject:           {}\n\
         Request changes:  {}\n\n\
         Or review in the app: {}\n\n\
         {FOOTER}\n",
        first_name(recipient_name),
        action_url(app_url, approve_token),
        action_url(app_url, reject_token),
        action_url(app_url, changes_token),
        event_url(app_url, event_id),
    );
    (subject, body)
}

/// An approved catering order is ready for payment processing.
pub fn payment_request(
    app_url: &str,
    event_id: DbId,
    event_title: &str,
    recipient_name: &str,
) -> (String, String) {
    let subject = format!("[Payment Required] {event_title}");
    let body = format!(
        "Hi {},\n\n\
         An approved catering order for \"{event_title}\" is ready for payment processing.\n\n\
         {}\n\n\
         {FOOTER}\n",
        first_name(recipient_name),
        event_url(app_url, event_id),
    );
    (subject, body)
}

/// An assigned task has sat unaccepted past the staleness window.
pub fn task_reminder(
    app_url: &str,
    event_id: DbId,
    event_title: &str,
    task_label: &str,
    assignee_name: &str,
) -> (String, String) {
    let subject = format!("[Reminder] {task_label} task still pending: {event_title}");
    let body = format!(
        "Hi {},\n\n\
         You were assigned to handle {task_label} for \"{event_title}\" over a week ago,\n\
         but the task hasn't been accepted yet. Please review and accept it:\n\n\
         {}\n\n\
         {FOOTER}\n",
        first_name(assignee_name),
        event_url(app_url, event_id),
    );
    (subject, body)
}
