//! Repository for the `flyer_tasks` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use lchub_core::types::DbId;

use crate::models::flyer::{FlyerTask, UpdateFlyerTask};
use crate::models::reminder::ReminderCandidate;

/// Column list for `flyer_tasks` queries.
const FLYER_COLUMNS: &str = "id, event_id, flyer_url, design_status, dist_email, dist_whatsapp, \
    dist_teams, dist_other, notes, assignee_id, accepted_at, reminder_sent_at, created_at, \
    updated_at";

/// Provides upsert and assignment writes for flyer tasks.
pub struct FlyerRepo;

impl FlyerRepo {
    /// Find the flyer task attached to an event.
    pub async fn find_by_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Option<FlyerTask>, sqlx::Error> {
        let query = format!("SELECT {FLYER_COLUMNS} FROM flyer_tasks WHERE event_id = $1");
        sqlx::query_as::<_, FlyerTask>(&query)
            .bind(event_id)
            .fetch_optional(pool)
            .await
    }

    /// Create a flyer task with initial details.
    pub async fn create(
        pool: &PgPool,
        event_id: DbId,
        input: &UpdateFlyerTask,
    ) -> Result<FlyerTask, sqlx::Error> {
        let query = format!(
            "INSERT INTO flyer_tasks
                (event_id, flyer_url, design_status, dist_email, dist_whatsapp, dist_teams,
                 dist_other, notes)
             VALUES ($1, $2, COALESCE($3, 'NOT_STARTED'), COALESCE($4, FALSE),
                     COALESCE($5, FALSE), COALESCE($6, FALSE), $7, $8)
             RETURNING {FLYER_COLUMNS}"
        );
        sqlx::query_as::<_, FlyerTask>(&query)
            .bind(event_id)
            .bind(&input.flyer_url)
            .bind(&input.design_status)
            .bind(input.dist_email)
            .bind(input.dist_whatsapp)
            .bind(input.dist_teams)
            .bind(&input.dist_other)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Replace the mutable flyer fields, preserving identity and the
    /// assignment history.
    pub async fn update(
        pool: &PgPool,
        event_id: DbId,
        input: &UpdateFlyerTask,
    ) -> Result<Option<FlyerTask>, sqlx::Error> {
        let query = format!(
            "UPDATE flyer_tasks SET
                flyer_url = $2,
                design_status = COALESCE($3, design_status),
                dist_email = COALESCE($4, dist_email),
                dist_whatsapp = COALESCE($5, dist_whatsapp),
                dist_teams = COALESCE($6, dist_teams),
                dist_other = $7,
                notes = $8,
                updated_at = now()
             WHERE event_id = $1
             RETURNING {FLYER_COLUMNS}"
        );
        sqlx::query_as::<_, FlyerTask>(&query)
            .bind(event_id)
            .bind(&input.flyer_url)
            .bind(&input.design_status)
            .bind(input.dist_email)
            .bind(input.dist_whatsapp)
            .bind(input.dist_teams)
            .bind(&input.dist_other)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Create an otherwise-empty flyer task carrying only an assignment.
    pub async fn create_with_assignee(
        pool: &PgPool,
        event_id: DbId,
        assignee_id: DbId,
    ) -> Result<FlyerTask, sqlx::Error> {
        let query = format!(
            "INSERT INTO flyer_tasks (event_id, assignee_id)
             VALUES ($1, $2)
             RETURNING {FLYER_COLUMNS}"
        );
        sqlx::query_as::<_, FlyerTask>(&query)
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
    ) -> Result<Option<FlyerTask>, sqlx::Error> {
        let query = format!(
            "UPDATE flyer_tasks SET
                assignee_id = $2,
                accepted_at = NULL,
                reminder_sent_at = NULL,
                updated_at = now()
             WHERE event_id = $1
             RETURNING {FLYER_COLUMNS}"
        );
        sqlx::query_as::<_, FlyerTask>(&query)
            .bind(event_id)
            .bind(assignee_id)
            .fetch_optional(pool)
            .await
    }

    /// Stamp acceptance.
    pub async fn accept(pool: &PgPool, event_id: DbId) -> Result<Option<FlyerTask>, sqlx::Error> {
        let query = format!(
            "UPDATE flyer_tasks SET accepted_at = now(), updated_at = now()
             WHERE event_id = $1
             RETURNING {FLYER_COLUMNS}"
        );
        sqlx::query_as::<_, FlyerTask>(&query)
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
                f.id AS record_id,
                e.id AS event_id,
                e.title AS event_title,
                u.id AS assignee_id,
                u.email AS assignee_email,
                u.name AS assignee_name
             FROM flyer_tasks f
             JOIN events e ON e.id = f.event_id AND e.deleted_at IS NULL
             JOIN users u ON u.id = f.assignee_id
             WHERE f.assignee_id IS NOT NULL
               AND f.accepted_at IS NULL
               AND f.reminder_sent_at IS NULL
               AND f.created_at < $1
               AND f.design_status <> 'DONE'",
        )
        .bind(cutoff)
        .fetch_all(pool)
        .await
    }

    /// Stamp `reminder_sent_at` after a reminder went out.
    pub async fn set_reminder_sent(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE flyer_tasks SET reminder_sent_at = now(), updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
