//! Repository for the `users` table.

use sqlx::PgPool;

use lchub_core::types::DbId;

use crate::models::user::{CreateUser, User};

/// Column list for `users` queries.
const USER_COLUMNS: &str =
    "id, name, email, password_hash, role, deleted_at, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Find a user by id, excluding soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query =
            format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email, excluding soft-deleted rows.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query =
            format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List active users holding any of the given roles, ordered by name.
    ///
    /// Used for notification fan-out (finance approvers, payment admins)
    /// and the assignment picker (leads).
    pub async fn list_active_by_roles(
        pool: &PgPool,
        roles: &[&str],
    ) -> Result<Vec<User>, sqlx::Error> {
        let roles: Vec<String> = roles.iter().map(|r| r.to_string()).collect();
        let query = format!(
            "SELECT {USER_COLUMNS} FROM users
             WHERE role = ANY($1) AND deleted_at IS NULL
             ORDER BY name ASC"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&roles)
            .fetch_all(pool)
            .await
    }
}
