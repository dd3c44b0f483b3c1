//! Repository for the `academic_years` table.

use sqlx::PgPool;

use lchub_core::types::DbId;

use crate::models::academic_year::{AcademicYear, CreateAcademicYear};

/// Column list for `academic_years` queries.
const YEAR_COLUMNS: &str = "id, label, start_month, start_year, end_month, end_year, budget, \
    is_current, created_at, updated_at";

/// Provides CRUD plus the atomic current-year switch.
pub struct AcademicYearRepo;

impl AcademicYearRepo {
    /// Insert a new academic year.
    ///
    /// When `is_current` is requested, any previously current row is
    /// cleared first, inside one transaction, preserving the single
    /// `is_current` invariant.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAcademicYear,
    ) -> Result<AcademicYear, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if input.is_current {
            sqlx::query("UPDATE academic_years SET is_current = FALSE, updated_at = now() WHERE is_current")
                .execute(&mut *tx)
                .await?;
        }

        let query = format!(
            "INSERT INTO academic_years
                (label, start_month, start_year, end_month, end_year, budget, is_current)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {YEAR_COLUMNS}"
        );
        let year = sqlx::query_as::<_, AcademicYear>(&query)
            .bind(&input.label)
            .bind(input.start_month)
            .bind(input.start_year)
            .bind(input.end_month)
            .bind(input.end_year)
            .bind(input.budget)
            .bind(input.is_current)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(year)
    }

    /// List all years, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<AcademicYear>, sqlx::Error> {
        let query = format!(
            "SELECT {YEAR_COLUMNS} FROM academic_years ORDER BY start_year DESC, start_month DESC"
        );
        sqlx::query_as::<_, AcademicYear>(&query).fetch_all(pool).await
    }

    /// Find a year by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AcademicYear>, sqlx::Error> {
        let query = format!("SELECT {YEAR_COLUMNS} FROM academic_years WHERE id = $1");
        sqlx::query_as::<_, AcademicYear>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The currently selected year, if any.
    pub async fn current(pool: &PgPool) -> Result<Option<AcademicYear>, sqlx::Error> {
        let query = format!("SELECT {YEAR_COLUMNS} FROM academic_years WHERE is_current LIMIT 1");
        sqlx::query_as::<_, AcademicYear>(&query)
            .fetch_optional(pool)
            .await
    }

    /// Atomically make `id` the single current year: clear all rows, then
    /// set one, in a single transaction.
    pub async fn switch_current(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AcademicYear>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("UPDATE academic_years SET is_current = FALSE, updated_at = now() WHERE is_current")
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "UPDATE academic_years SET is_current = TRUE, updated_at = now()
             WHERE id = $1
             RETURNING {YEAR_COLUMNS}"
        );
        let year = sqlx::query_as::<_, AcademicYear>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(year)
    }

    /// Update the start month and/or budget of a year.
    pub async fn update_settings(
        pool: &PgPool,
        id: DbId,
        start_month: Option<i32>,
        budget: Option<f64>,
    ) -> Result<Option<AcademicYear>, sqlx::Error> {
        let query = format!(
            "UPDATE academic_years SET
                start_month = COALESCE($2, start_month),
                budget = COALESCE($3, budget),
                updated_at = now()
             WHERE id = $1
             RETURNING {YEAR_COLUMNS}"
        );
        sqlx::query_as::<_, AcademicYear>(&query)
            .bind(id)
            .bind(start_month)
            .bind(budget)
            .fetch_optional(pool)
            .await
    }
}
