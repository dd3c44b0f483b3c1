//! Repository for the `action_tokens` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use lchub_core::types::DbId;

use crate::models::action_token::ActionToken;

/// Column list for `action_tokens` queries.
const TOKEN_COLUMNS: &str =
    "id, token, token_type, event_id, user_id, expires_at, used_at, created_at";

/// Provides issue/consume operations for action tokens. Rows are never
/// deleted; the table is the audit trail.
pub struct ActionTokenRepo;

impl ActionTokenRepo {
    /// Persist a freshly issued token.
    pub async fn create(
        pool: &PgPool,
        token: &str,
        token_type: &str,
        event_id: DbId,
        user_id: DbId,
        expires_at: DateTime<Utc>,
    ) -> Result<ActionToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO action_tokens (token, token_type, event_id, user_id, expires_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {TOKEN_COLUMNS}"
        );
        sqlx::query_as::<_, ActionToken>(&query)
            .bind(token)
            .bind(token_type)
            .bind(event_id)
            .bind(user_id)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    /// Look up a token by its opaque string.
    pub async fn find_by_token(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<ActionToken>, sqlx::Error> {
        let query = format!("SELECT {TOKEN_COLUMNS} FROM action_tokens WHERE token = $1");
        sqlx::query_as::<_, ActionToken>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// Atomically consume a token: set `used_at` only if still unset.
    ///
    /// Returns `true` when this caller won the consumption. A concurrent
    /// resolver that lost the race gets `false` and must report the token
    /// as already used; the side effect then runs at most once.
    pub async fn mark_used(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE action_tokens SET used_at = now() WHERE id = $1 AND used_at IS NULL")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() == 1)
    }
}
