//! Repository for the `catering_approvals` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use lchub_core::types::DbId;

use crate::models::catering::{CateringApproval, UpdateCateringDetails};
use crate::models::reminder::ReminderCandidate;

/// Column list for `catering_approvals` queries.
const CATERING_COLUMNS: &str = "id, event_id, status, payment_status, vendor, estimated_cost, \
    actual_cost, menu_details, dietary_notes, headcount, order_link, invoice_url, submitted_at, \
    revision_count, change_notes, decided_by_id, decided_at, paid_by_id, paid_at, payment_note, \
    assignee_id, accepted_at, reminder_sent_at, created_at, updated_at";

/// Provides state-machine and assignment writes for catering approvals.
pub struct CateringRepo;

impl CateringRepo {
    /// Find the catering record attached to an event.
    pub async fn find_by_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Option<CateringApproval>, sqlx::Error> {
        let query = format!("SELECT {CATERING_COLUMNS} FROM catering_approvals WHERE event_id = $1");
        sqlx::query_as::<_, CateringApproval>(&query)
            .bind(event_id)
            .fetch_optional(pool)
            .await
    }

    /// Create the record at event-creation time with initial details.
    pub async fn create_for_event(
        pool: &PgPool,
        event_id: DbId,
        details: &UpdateCateringDetails,
    ) -> Result<CateringApproval, sqlx::Error> {
        let query = format!(
            "INSERT INTO catering_approvals
                (event_id, vendor, estimated_cost, menu_details, dietary_notes, headcount, order_link)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {CATERING_COLUMNS}"
        );
        sqlx::query_as::<_, CateringApproval>(&query)
            .bind(event_id)
            .bind(&details.vendor)
            .bind(details.estimated_cost)
            .bind(&details.menu_details)
            .bind(&details.dietary_notes)
            .bind(details.headcount)
            .bind(&details.order_link)
            .fetch_one(pool)
            .await
    }

    /// Create an otherwise-empty record carrying only an assignment. Used
    /// when a task lead is assigned before any catering details exist.
    pub async fn create_with_assignee(
        pool: &PgPool,
        event_id: DbId,
        assignee_id: DbId,
    ) -> Result<CateringApproval, sqlx::Error> {
        let query = format!(
            "INSERT INTO catering_approvals (event_id, assignee_id)
             VALUES ($1, $2)
             RETURNING {CATERING_COLUMNS}"
        );
        sqlx::query_as::<_, CateringApproval>(&query)
            .bind(event_id)
            .bind(assignee_id)
            .fetch_one(pool)
            .await
    }

    /// Update the champion-editable detail fields.
    pub async fn update_details(
        pool: &PgPool,
        event_id: DbId,
        input: &UpdateCateringDetails,
    ) -> Result<Option<CateringApproval>, sqlx::Error> {
        let query = format!(
            "UPDATE catering_approvals SET
                vendor = COALESCE($2, vendor),
                estimated_cost = COALESCE($3, estimated_cost),
                actual_cost = COALESCE($4, actual_cost),
                menu_details = COALESCE($5, menu_details),
                dietary_notes = COALESCE($6, dietary_notes),
                headcount = COALESCE($7, headcount),
                order_link = COALESCE($8, order_link),
                invoice_url = COALESCE($9, invoice_url),
                updated_at = now()
             WHERE event_id = $1
             RETURNING {CATERING_COLUMNS}"
        );
        sqlx::query_as::<_, CateringApproval>(&query)
            .bind(event_id)
            .bind(&input.vendor)
            .bind(input.estimated_cost)
            .bind(input.actual_cost)
            .bind(&input.menu_details)
            .bind(&input.dietary_notes)
            .bind(input.headcount)
            .bind(&input.order_link)
            .bind(&input.invoice_url)
            .fetch_optional(pool)
            .await
    }

    /// Move to `AWAITING_APPROVAL`, stamping `submitted_at` and adding the
    /// caller-computed revision increment (1 for a resubmission cycle).
    pub async fn submit(
        pool: &PgPool,
        event_id: DbId,
        revision_increment: i32,
    ) -> Result<Option<CateringApproval>, sqlx::Error> {
        let query = format!(
            "UPDATE catering_approvals SET
                status = 'AWAITING_APPROVAL',
                submitted_at = now(),
                revision_count = revision_count + $2,
                updated_at = now()
             WHERE event_id = $1
             RETURNING {CATERING_COLUMNS}"
        );
        sqlx::query_as::<_, CateringApproval>(&query)
            .bind(event_id)
            .bind(revision_increment)
            .fetch_optional(pool)
            .await
    }

    /// Apply a decision, stamping the deciding actor and time.
    ///
    /// `change_notes` must already follow the notes rule: populated only
    /// for `CHANGES_REQUESTED`, `None` otherwise (which clears any prior
    /// notes).
    pub async fn apply_decision(
        pool: &PgPool,
        event_id: DbId,
        status: &str,
        decided_by_id: DbId,
        change_notes: Option<&str>,
    ) -> Result<Option<CateringApproval>, sqlx::Error> {
        let query = format!(
            "UPDATE catering_approvals SET
                status = $2,
                decided_at = now(),
                decided_by_id = $3,
                change_notes = $4,
                updated_at = now()
             WHERE event_id = $1
             RETURNING {CATERING_COLUMNS}"
        );
        sqlx::query_as::<_, CateringApproval>(&query)
            .bind(event_id)
            .bind(status)
            .bind(decided_by_id)
            .bind(change_notes)
            .fetch_optional(pool)
            .await
    }

    /// Move the payment axis to `REQUESTED`.
    pub async fn set_payment_requested(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Option<CateringApproval>, sqlx::Error> {
        let query = format!(
            "UPDATE catering_approvals SET payment_status = 'REQUESTED', updated_at = now()
             WHERE event_id = $1
             RETURNING {CATERING_COLUMNS}"
        );
        sqlx::query_as::<_, CateringApproval>(&query)
            .bind(event_id)
            .fetch_optional(pool)
            .await
    }

    /// Move the payment axis to `PAID`, stamping the payer and note.
    pub async fn mark_paid(
        pool: &PgPool,
        event_id: DbId,
        paid_by_id: DbId,
        payment_note: &str,
    ) -> Result<Option<CateringApproval>, sqlx::Error> {
        let query = format!(
            "UPDATE catering_approvals SET
                payment_status = 'PAID',
                paid_by_id = $2,
                paid_at = now(),
                payment_note = $3,
                updated_at = now()
             WHERE event_id = $1
             RETURNING {CATERING_COLUMNS}"
        );
        sqlx::query_as::<_, CateringApproval>(&query)
            .bind(event_id)
            .bind(paid_by_id)
            .bind(payment_note)
            .fetch_optional(pool)
            .await
    }

    /// Assign a task lead. Always resets `accepted_at` and
    /// `reminder_sent_at` so a reassignment restarts the acceptance clock.
    pub async fn assign(
        pool: &PgPool,
        event_id: DbId,
        assignee_id: DbId,
    ) -> Result<Option<CateringApproval>, sqlx::Error> {
        let query = format!(
            "UPDATE catering_approvals SET
                assignee_id = $2,
                accepted_at = NULL,
                reminder_sent_at = NULL,
                updated_at = now()
             WHERE event_id = $1
             RETURNING {CATERING_COLUMNS}"
        );
        sqlx::query_as::<_, CateringApproval>(&query)
            .bind(event_id)
            .bind(assignee_id)
            .fetch_optional(pool)
            .await
    }

    /// Stamp acceptance by the current assignee.
    pub async fn accept(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Option<CateringApproval>, sqlx::Error> {
        let query = format!(
            "UPDATE catering_approvals SET accepted_at = now(), updated_at = now()
             WHERE event_id = $1
             RETURNING {CATERING_COLUMNS}"
        );
        sqlx::query_as::<_, CateringApproval>(&query)
            .bind(event_id)
            .fetch_optional(pool)
            .await
    }

    /// Select stale, unaccepted, unreminded assignments for the sweep.
    ///
    /// Excludes decided records (`APPROVED`/`REJECTED`) and events that
    /// have been soft-deleted.
    pub async fn find_reminder_candidates(
        pool: &PgPool,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<ReminderCandidate>, sqlx::Error> {
        sqlx::query_as::<_, ReminderCandidate>(
            "SELECT
                c.id AS record_id,
                e.id AS event_id,
                e.title AS event_title,
                u.id AS assignee_id,
                u.email AS assignee_email,
                u.name AS assignee_name
             FROM catering_approvals c
             JOIN events e ON e.id = c.event_id AND e.deleted_at IS NULL
             JOIN users u ON u.id = c.assignee_id
             WHERE c.assignee_id IS NOT NULL
               AND c.accepted_at IS NULL
               AND c.reminder_sent_at IS NULL
               AND c.created_at < $1
               AND c.status NOT IN ('APPROVED', 'REJECTED')",
        )
        .bind(cutoff)
        .fetch_all(pool)
        .await
    }

    /// Stamp `reminder_sent_at` after a reminder went out.
    pub async fn set_reminder_sent(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE catering_approvals SET reminder_sent_at = now(), updated_at = now()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
