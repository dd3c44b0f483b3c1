//! Repository for the `events` table.

use sqlx::PgPool;

use lchub_core::types::DbId;

use crate::models::event::{CreateEvent, Event, Retrospective, UpdateEvent};

/// Column list for `events` queries.
const EVENT_COLUMNS: &str = "id, title, description, event_date, start_time, location, semester, \
    tags, status, budget_amount, headcount, do_again, reinvite_speaker, retrospective_notes, \
    academic_year_id, created_by_id, deleted_at, created_at, updated_at";

/// Provides CRUD operations for events. All reads exclude soft-deleted
/// rows; deletion only ever sets `deleted_at`.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event (status starts at `DRAFT`), returning the row.
    pub async fn create(pool: &PgPool, input: &CreateEvent) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events
                (title, description, event_date, start_time, location, semester, tags,
                 budget_amount, academic_year_id, created_by_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {EVENT_COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.event_date)
            .bind(&input.start_time)
            .bind(&input.location)
            .bind(&input.semester)
            .bind(&input.tags)
            .bind(input.budget_amount)
            .bind(input.academic_year_id)
            .bind(input.created_by_id)
            .fetch_one(pool)
            .await
    }

    /// Find an event by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query =
            format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List events newest-first, optionally filtered by academic year.
    pub async fn list(
        pool: &PgPool,
        academic_year_id: Option<DbId>,
    ) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {EVENT_COLUMNS} FROM events
             WHERE deleted_at IS NULL
               AND ($1::bigint IS NULL OR academic_year_id = $1)
             ORDER BY event_date DESC, id DESC"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(academic_year_id)
            .fetch_all(pool)
            .await
    }

    /// Partially update event fields. `None` leaves a column untouched.
    pub async fn update_fields(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEvent,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                event_date = COALESCE($4, event_date),
                start_time = COALESCE($5, start_time),
                location = COALESCE($6, location),
                semester = COALESCE($7, semester),
                tags = COALESCE($8, tags),
                budget_amount = COALESCE($9, budget_amount),
                headcount = COALESCE($10, headcount),
                updated_at = now()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {EVENT_COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.event_date)
            .bind(&input.start_time)
            .bind(&input.location)
            .bind(&input.semester)
            .bind(&input.tags)
            .bind(input.budget_amount)
            .bind(input.headcount)
            .fetch_optional(pool)
            .await
    }

    /// Set the lifecycle status. The setter is permissive: the caller has
    /// already validated the target string against the known states.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET status = $2, updated_at = now()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {EVENT_COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Record a retrospective and force status to `COMPLETED` as one
    /// atomic update.
    pub async fn set_retrospective(
        pool: &PgPool,
        id: DbId,
        retro: &Retrospective,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET
                headcount = $2,
                do_again = $3,
                reinvite_speaker = $4,
                retrospective_notes = $5,
                status = 'COMPLETED',
                updated_at = now()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {EVENT_COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(retro.headcount)
            .bind(retro.do_again)
            .bind(retro.reinvite_speaker)
            .bind(&retro.notes)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete an event. Returns whether a live row was affected.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE events SET deleted_at = now(), updated_at = now()
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}
