//! Repository for the `checklist_items` table.

use sqlx::PgPool;

use lchub_core::types::DbId;

use crate::models::checklist::ChecklistItem;

/// Column list for `checklist_items` queries.
const ITEM_COLUMNS: &str =
    "id, event_id, label, is_checked, is_custom, sort_order, created_at, updated_at";

/// Provides seed/append/toggle operations for day-of checklists.
pub struct ChecklistRepo;

impl ChecklistRepo {
    /// Seed the default checklist for a freshly created event.
    pub async fn seed_defaults(
        pool: &PgPool,
        event_id: DbId,
        labels: &[&str],
    ) -> Result<(), sqlx::Error> {
        for (i, label) in labels.iter().enumerate() {
            sqlx::query(
                "INSERT INTO checklist_items (event_id, label, is_custom, sort_order)
                 VALUES ($1, $2, FALSE, $3)",
            )
            .bind(event_id)
            .bind(label)
            .bind(i as i32)
            .execute(pool)
            .await?;
        }
        Ok(())
    }

    /// Append a custom item after the current maximum sort order.
    pub async fn add_custom(
        pool: &PgPool,
        event_id: DbId,
        label: &str,
    ) -> Result<ChecklistItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO checklist_items (event_id, label, is_custom, sort_order)
             VALUES ($1, $2, TRUE,
                     COALESCE((SELECT MAX(sort_order) FROM checklist_items WHERE event_id = $1), 0) + 1)
             RETURNING {ITEM_COLUMNS}"
        );
        sqlx::query_as::<_, ChecklistItem>(&query)
            .bind(event_id)
            .bind(label)
            .fetch_one(pool)
            .await
    }

    /// Set the checked flag on an item.
    pub async fn set_checked(
        pool: &PgPool,
        id: DbId,
        checked: bool,
    ) -> Result<Option<ChecklistItem>, sqlx::Error> {
        let query = format!(
            "UPDATE checklist_items SET is_checked = $2, updated_at = now()
             WHERE id = $1
             RETURNING {ITEM_COLUMNS}"
        );
        sqlx::query_as::<_, ChecklistItem>(&query)
            .bind(id)
            .bind(checked)
            .fetch_optional(pool)
            .await
    }

    /// List items for an event in display order.
    pub async fn list_for_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Vec<ChecklistItem>, sqlx::Error> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM checklist_items
             WHERE event_id = $1
             ORDER BY sort_order ASC"
        );
        sqlx::query_as::<_, ChecklistItem>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }
}
