//! Academic year entity model and DTOs.

use lchub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `academic_years` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AcademicYear {
    pub id: DbId,
    pub label: String,
    pub start_month: i32,
    pub start_year: i32,
    pub end_month: i32,
    pub end_year: i32,
    pub budget: Option<f64>,
    pub is_current: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an academic year. End month/year are derived from the
/// start by the handler.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAcademicYear {
    pub label: String,
    pub start_month: i32,
    pub start_year: i32,
    pub end_month: i32,
    pub end_year: i32,
    pub budget: Option<f64>,
    pub is_current: bool,
}
