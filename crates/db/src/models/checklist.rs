//! Day-of checklist entity model.

use lchub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `checklist_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChecklistItem {
    pub id: DbId,
    pub event_id: DbId,
    pub label: String,
    pub is_checked: bool,
    pub is_custom: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
