//! Repository for the `email_logs` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use lchub_core::types::DbId;

use crate::models::email_log::{CreateEmailLog, EmailLog};

/// Column list for `email_logs` queries.
const EMAIL_LOG_COLUMNS: &str =
    "id, to_email, subject, reason, status, event_id, recipient_id, dedupe_key, sent_at";

/// Append-only log of notification attempts; also the dedupe index.
pub struct EmailLogRepo;

impl EmailLogRepo {
    /// Append one attempt row.
    pub async fn create(pool: &PgPool, input: &CreateEmailLog) -> Result<EmailLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO email_logs
                (to_email, subject, reason, status, event_id, recipient_id, dedupe_key)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {EMAIL_LOG_COLUMNS}"
        );
        sqlx::query_as::<_, EmailLog>(&query)
            .bind(&input.to_email)
            .bind(&input.subject)
            .bind(&input.reason)
            .bind(&input.status)
            .bind(input.event_id)
            .bind(input.recipient_id)
            .bind(&input.dedupe_key)
            .fetch_one(pool)
            .await
    }

    /// Most recent row carrying the same dedupe key sent at or after
    /// `since`. A hit suppresses a new send.
    pub async fn find_recent_by_dedupe_key(
        pool: &PgPool,
        dedupe_key: &str,
        since: DateTime<Utc>,
    ) -> Result<Option<EmailLog>, sqlx::Error> {
        let query = format!(
            "SELECT {EMAIL_LOG_COLUMNS} FROM email_logs
             WHERE dedupe_key = $1 AND sent_at >= $2
             ORDER BY sent_at DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, EmailLog>(&query)
            .bind(dedupe_key)
            .bind(since)
            .fetch_optional(pool)
            .await
    }

    /// List all attempts for an event, newest first.
    pub async fn list_for_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Vec<EmailLog>, sqlx::Error> {
        let query = format!(
            "SELECT {EMAIL_LOG_COLUMNS} FROM email_logs
             WHERE event_id = $1
             ORDER BY sent_at DESC"
        );
        sqlx::query_as::<_, EmailLog>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }
}
