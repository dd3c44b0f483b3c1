//! Catering approval entity model and DTOs.

use lchub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `catering_approvals` table.
///
/// `status` and `payment_status` hold the stored forms of
/// `lchub_core::catering::{CateringStatus, PaymentStatus}`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CateringApproval {
    pub id: DbId,
    pub event_id: DbId,
    pub status: String,
    pub payment_status: String,
    pub vendor: Option<String>,
    pub estimated_cost: Option<f64>,
    pub actual_cost: Option<f64>,
    pub menu_details: Option<String>,
    pub dietary_notes: Option<String>,
    pub headcount: Option<i32>,
    pub order_link: Option<String>,
    pub invoice_url: Option<String>,
    pub submitted_at: Option<Timestamp>,
    pub revision_count: i32,
    pub change_notes: Option<String>,
    pub decided_by_id: Option<DbId>,
    pub decided_at: Option<Timestamp>,
    pub paid_by_id: Option<DbId>,
    pub paid_at: Option<Timestamp>,
    pub payment_note: Option<String>,
    pub assignee_id: Option<DbId>,
    pub accepted_at: Option<Timestamp>,
    pub reminder_sent_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Mutable detail fields, editable by the champion at any point (including
/// between `CHANGES_REQUESTED` and resubmission).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCateringDetails {
    pub vendor: Option<String>,
    pub estimated_cost: Option<f64>,
    pub actual_cost: Option<f64>,
    pub menu_details: Option<String>,
    pub dietary_notes: Option<String>,
    pub headcount: Option<i32>,
    pub order_link: Option<String>,
    pub invoice_url: Option<String>,
}
