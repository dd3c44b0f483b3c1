//! Expense entity model and DTOs.

use lchub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `expenses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Expense {
    pub id: DbId,
    pub event_id: DbId,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub vendor: Option<String>,
    pub notes: Option<String>,
    pub is_paid: bool,
    pub paid_date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding an expense to an event.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateExpense {
    pub description: String,
    #[serde(default)]
    pub amount: f64,
    pub category: Option<String>,
    pub vendor: Option<String>,
    pub notes: Option<String>,
}
