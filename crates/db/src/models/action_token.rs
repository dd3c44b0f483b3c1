//! Action token entity model.

use lchub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `action_tokens` table. Append-only: `used_at` is the
/// only column ever written after insertion, exactly once.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActionToken {
    pub id: DbId,
    pub token: String,
    pub token_type: String,
    pub event_id: DbId,
    pub user_id: DbId,
    pub expires_at: Timestamp,
    pub used_at: Option<Timestamp>,
    pub created_at: Timestamp,
}
