//! Repository for the `room_reservations` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use lchub_core::types::DbId;

use crate::models::reminder::ReminderCandidate;
use crate::models::room::{RoomReservation, UpdateRoomReservation};

/// Column list for `room_reservations` queries.
const ROOM_COLUMNS: &str = "id, event_id, room_name, reservation_url, confirmation_id, notes, \
    status, confirmed_at, assignee_id, accepted_at, reminder_sent_at, created_at, updated_at";

/// Provides upsert and assignment writes for room reservations.
pub struct RoomRepo;

impl RoomRepo {
    /// Find the reservation attached to an event.
    pub async fn find_by_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Option<RoomReservation>, sqlx::Error> {
        let query = format!("SELECT {ROOM_COLUMNS} FROM room_reservations WHERE event_id = $1");
        sqlx::query_as::<_, RoomReservation>(&query)
            .bind(event_id)
            .fetch_optional(pool)
            .await
    }

    /// Create a reservation with initial details.
    ///
    /// `confirmed_at` is set when the initial status is already
    /// `CONFIRMED`.
    pub async fn create(
        pool: &PgPool,
        event_id: DbId,
        input: &UpdateRoomReservation,
        confirmed_at: Option<DateTime<Utc>>,
    ) -> Result<RoomReservation, sqlx::Error> {
        let query = format!(
            "INSERT INTO room_reservations
                (event_id, room_name, reservation_url, confirmation_id, notes, status, confirmed_at)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'PENDING'), $7)
             RETURNING {ROOM_COLUMNS}"
        );
        sqlx::query_as::<_, RoomReservation>(&query)
            .bind(event_id)
            .bind(&input.room_name)
            .bind(&input.reservation_url)
            .bind(&input.confirmation_id)
            .bind(&input.notes)
            .bind(&input.status)
            .bind(confirmed_at)
            .fetch_one(pool)
            .await
    }

    /// Replace the mutable reservation fields, preserving identity and the
    /// assignment history.
    pub async fn update(
        pool: &PgPool,
        event_id: DbId,
        input: &UpdateRoomReservation,
        confirmed_at: Option<DateTime<Utc>>,
    ) -> Result<Option<RoomReservation>, sqlx::Error> {
        let query = format!(
            "UPDATE room_reservations SET
                room_name = $2,
                reservation_url = $3,
                confirmation_id = $4,
                notes = $5,
                status = COALESCE($6, status),
                confirmed_at = $7,
                updated_at = now()
             WHERE event_id = $1
             RETURNING {ROOM_COLUMNS}"
        );
        sqlx::query_as::<_, RoomReservation>(&query)
            .bind(event_id)
            .bind(&input.room_name)
            .bind(&input.reservation_url)
            .bind(&input.confirmation_id)
            .bind(&input.notes)
            .bind(&input.status)
            .bind(confirmed_at)
            .fetch_optional(pool)
            .await
    }

    /// Create an otherwise-empty reservation carrying only an assignment.
    pub async fn create_with_assignee(
        pool: &PgPool,
        event_id: DbId,
        assignee_id: DbId,
    ) -> Result<RoomReservation, sqlx::Error> {
        let query = format!(
            "INSERT INTO room_reservations (event_id, assignee_id)
             VALUES ($1, $2)
             RETURNING {ROOM_COLUMNS}"
        );
        sqlx::query_as::<_, RoomReservation>(&query)
            .bind(event_id)
            .bind(assignee_id)
            .fetch_one(pool)
            .await
    }

    /// Assign a task lead, resetting `accepted_at` and `reminder_sent_at`.
    pub async fn assign(
        pool: &PgPool,
        event_id: DbId,
        assignee_id: DbId,
    ) -> Result<Option<RoomReservation>, sqlx::Error> {
        let query = format!(
            "UPDATE room_reservations SET
                assignee_id = $2,
                accepted_at = NULL,
                reminder_sent_at = NULL,
                updated_at = now()
             WHERE event_id = $1
             RETURNING {ROOM_COLUMNS}"
        );
        sqlx::query_as::<_, RoomReservation>(&query)
            .bind(event_id)
            .bind(assignee_id)
            .fetch_optional(pool)
            .await
    }

    /// Stamp acceptance. Rooms additionally advance `PENDING` to
    /// `ACCEPTED` when the task is taken.
    pub async fn accept(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Option<RoomReservation>, sqlx::Error> {
        let query = format!(
            "UPDATE room_reservations SET
                accepted_at = now(),
                status = 'ACCEPTED',
                updated_at = now()
             WHERE event_id = $1
             RETURNING {ROOM_COLUMNS}"
        );
        sqlx::query_as::<_, RoomReservation>(&query)
            .bind(event_id)
            .fetch_optional(pool)
            .await
    }

    /// Select stale, unaccepted, unreminded assignments for the sweep.
    pub async fn find_reminder_candidates(
        pool: &PgPool,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<ReminderCandidate>, sqlx::Error> {
        sqlx::query_as::<_, ReminderCandidate>(
            "SELECT
                r.id AS record_id,
                e.id AS event_id,
                e.title AS event_title,
                u.id AS assignee_id,
                u.email AS assignee_email,
                u.name AS assignee_name
             FROM room_reservations r
             JOIN events e ON e.id = r.event_id AND e.deleted_at IS NULL
             JOIN users u ON u.id = r.assignee_id
             WHERE r.assignee_id IS NOT NULL
               AND r.accepted_at IS NULL
               AND r.reminder_sent_at IS NULL
               AND r.created_at < $1
               AND r.status NOT IN ('CONFIRMED', 'CANCELLED')",
        )
        .bind(cutoff)
        .fetch_all(pool)
        .await
    }

    /// Stamp `reminder_sent_at` after a reminder went out.
    pub async fn set_reminder_sent(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE room_reservations SET reminder_sent_at = now(), updated_at = now()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
