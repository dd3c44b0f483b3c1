//! Repository for the `expenses` table.

use sqlx::PgPool;

use lchub_core::types::DbId;

use crate::models::expense::{CreateExpense, Expense};

/// Column list for `expenses` queries.
const EXPENSE_COLUMNS: &str = "id, event_id, description, amount, category, vendor, notes, \
    is_paid, paid_date, created_at, updated_at";

/// Provides CRUD operations for event expenses.
pub struct ExpenseRepo;

impl ExpenseRepo {
    /// Insert a new expense for an event.
    pub async fn create(
        pool: &PgPool,
        event_id: DbId,
        input: &CreateExpense,
    ) -> Result<Expense, sqlx::Error> {
        let query = format!(
            "INSERT INTO expenses (event_id, description, amount, category, vendor, notes)
             VALUES ($1, $2, $3, COALESCE($4, 'OTHER'), $5, $6)
             RETURNING {EXPENSE_COLUMNS}"
        );
        sqlx::query_as::<_, Expense>(&query)
            .bind(event_id)
            .bind(&input.description)
            .bind(input.amount)
            .bind(&input.category)
            .bind(&input.vendor)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find an expense by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Expense>, sqlx::Error> {
        let query = format!("SELECT {EXPENSE_COLUMNS} FROM expenses WHERE id = $1");
        sqlx::query_as::<_, Expense>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List expenses for an event, oldest first.
    pub async fn list_for_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Vec<Expense>, sqlx::Error> {
        let query = format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE event_id = $1 ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Expense>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }

    /// Flip the paid flag, stamping or clearing `paid_date` accordingly.
    pub async fn set_paid(
        pool: &PgPool,
        id: DbId,
        is_paid: bool,
    ) -> Result<Option<Expense>, sqlx::Error> {
        let query = format!(
            "UPDATE expenses SET
                is_paid = $2,
                paid_date = CASE WHEN $2 THEN now() ELSE NULL END,
                updated_at = now()
             WHERE id = $1
             RETURNING {EXPENSE_COLUMNS}"
        );
        sqlx::query_as::<_, Expense>(&query)
            .bind(id)
            .bind(is_paid)
            .fetch_optional(pool)
            .await
    }

    /// Delete an expense. Returns whether a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }
}
