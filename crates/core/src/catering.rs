//! Catering approval and payment state machines.
//!
//! A catering record carries two orthogonal axes: the approval status and
//! the payment status. The cross-axis invariant is that payment may only
//! leave `PENDING` once the approval axis is `APPROVED`. Approving always
//! raises a payment request, whether the decision was made in-app or via a
//! one-click action token.

use serde::{Deserialize, Serialize};

/// Default note stored when a payment is marked paid without one.
pub const DEFAULT_PAYMENT_NOTE: &str = "Done";

// ---------------------------------------------------------------------------
// Approval axis
// ---------------------------------------------------------------------------

/// Approval status of a catering request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CateringStatus {
    Draft,
    AwaitingApproval,
    Approved,
    Rejected,
    ChangesRequested,
}

impl CateringStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CateringStatus::Draft => "DRAFT",
            CateringStatus::AwaitingApproval => "AWAITING_APPROVAL",
            CateringStatus::Approved => "APPROVED",
            CateringStatus::Rejected => "REJECTED",
            CateringStatus::ChangesRequested => "CHANGES_REQUESTED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "DRAFT" => Some(CateringStatus::Draft),
            "AWAITING_APPROVAL" => Some(CateringStatus::AwaitingApproval),
            "APPROVED" => Some(CateringStatus::Approved),
            "REJECTED" => Some(CateringStatus::Rejected),
            "CHANGES_REQUESTED" => Some(CateringStatus::ChangesRequested),
            _ => None,
        }
    }

    /// Terminal for the reminder sweep: no acceptance nudge is useful once
    /// the request has been decided one way or the other.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CateringStatus::Approved | CateringStatus::Rejected)
    }
}

/// The three decisions a financial approver can make.
///
/// Subset of [`CateringStatus`]: a decision always lands the record in one
/// of these states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CateringDecision {
    Approved,
    Rejected,
    ChangesRequested,
}

impl CateringDecision {
    pub fn as_status(&self) -> CateringStatus {
        match self {
            CateringDecision::Approved => CateringStatus::Approved,
            CateringDecision::Rejected => CateringStatus::Rejected,
            CateringDecision::ChangesRequested => CateringStatus::ChangesRequested,
        }
    }
}

/// Outcome of submitting a catering request for approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    pub new_status: CateringStatus,
    /// Added to `revision_count`: 1 when resubmitting after
    /// `CHANGES_REQUESTED`, 0 otherwise. One increment per resubmission
    /// cycle, not per edit.
    pub revision_increment: i32,
}

/// Compute the submit-for-approval transition.
///
/// Submission is not guarded on the current state (an already-awaiting
/// record may be resubmitted without effect on the count).
pub fn submit(current: CateringStatus) -> Submission {
    Submission {
        new_status: CateringStatus::AwaitingApproval,
        revision_increment: if current == CateringStatus::ChangesRequested {
            1
        } else {
            0
        },
    }
}

/// Change notes to store alongside a decision.
///
/// Free-text notes are kept only for `CHANGES_REQUESTED` and cleared on any
/// other decision.
pub fn change_notes_for(decision: CateringDecision, notes: Option<String>) -> Option<String> {
    match decision {
        CateringDecision::ChangesRequested => notes,
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Payment axis
// ---------------------------------------------------------------------------

/// Payment status of a catering request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Requested,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Requested => "REQUESTED",
            PaymentStatus::Paid => "PAID",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(PaymentStatus::Pending),
            "REQUESTED" => Some(PaymentStatus::Requested),
            "PAID" => Some(PaymentStatus::Paid),
            _ => None,
        }
    }
}

/// Validate a payment-axis transition against the cross-axis invariant.
///
/// Payment may only leave `PENDING` while the approval axis is `APPROVED`.
pub fn validate_payment_transition(
    approval: CateringStatus,
    from: PaymentStatus,
    to: PaymentStatus,
) -> Result<(), String> {
    if from == PaymentStatus::Pending
        && to != PaymentStatus::Pending
        && approval != CateringStatus::Approved
    {
        return Err(format!(
            "Payment cannot move to {} while the catering request is {}",
            to.as_str(),
            approval.as_str()
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_from_draft_does_not_increment_revision() {
        let s = submit(CateringStatus::Draft);
        assert_eq!(s.new_status, CateringStatus::AwaitingApproval);
        assert_eq!(s.revision_increment, 0);
    }

    #[test]
    fn test_resubmit_after_changes_requested_increments_once() {
        let s = submit(CateringStatus::ChangesRequested);
        assert_eq!(s.new_status, CateringStatus::AwaitingApproval);
        assert_eq!(s.revision_increment, 1);
    }

    #[test]
    fn test_resubmit_while_awaiting_is_a_no_op_on_revision() {
        assert_eq!(submit(CateringStatus::AwaitingApproval).revision_increment, 0);
    }

    #[test]
    fn test_change_notes_kept_only_for_changes_requested() {
        let notes = Some("less coffee".to_string());
        assert_eq!(
            change_notes_for(CateringDecision::ChangesRequested, notes.clone()),
            notes
        );
        assert_eq!(change_notes_for(CateringDecision::Approved, notes.clone()), None);
        assert_eq!(change_notes_for(CateringDecision::Rejected, notes), None);
    }

    #[test]
    fn test_payment_gated_on_approval() {
        for approval in [
            CateringStatus::Draft,
            CateringStatus::AwaitingApproval,
            CateringStatus::Rejected,
            CateringStatus::ChangesRequested,
        ] {
            assert!(
                validate_payment_transition(approval, PaymentStatus::Pending, PaymentStatus::Requested)
                    .is_err(),
                "payment must stay PENDING while {approval:?}"
            );
        }
        assert!(validate_payment_transition(
            CateringStatus::Approved,
            PaymentStatus::Pending,
            PaymentStatus::Requested
        )
        .is_ok());
    }

    #[test]
    fn test_paid_reachable_once_requested() {
        // Once payment has left PENDING the gate no longer applies.
        assert!(validate_payment_transition(
            CateringStatus::Approved,
            PaymentStatus::Requested,
            PaymentStatus::Paid
        )
        .is_ok());
    }

    #[test]
    fn test_decision_maps_to_status() {
        assert_eq!(
            CateringDecision::Approved.as_status(),
            CateringStatus::Approved
        );
        assert_eq!(
            CateringDecision::ChangesRequested.as_status(),
            CateringStatus::ChangesRequested
        );
    }

    #[test]
    fn test_terminal_states_for_reminders() {
        assert!(CateringStatus::Approved.is_terminal());
        assert!(CateringStatus::Rejected.is_terminal());
        assert!(!CateringStatus::AwaitingApproval.is_terminal());
        assert!(!CateringStatus::ChangesRequested.is_terminal());
    }
}
