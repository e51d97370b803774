//! Repository for the `users` table, including the points ledger.

use sqlx::PgPool;
use taskflow_core::types::DbId;

use crate::models::user::{CreateUser, UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, password_hash, points, created_at, updated_at";

/// Provides CRUD operations for users and atomic points updates.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// A duplicate username surfaces as a unique violation on
    /// `uq_users_username`; the caller classifies that as a conflict.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, password_hash)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive exact match).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                username = COALESCE($2, username),
                password_hash = COALESCE($3, password_hash),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.username)
            .bind(&input.password_hash)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a user. Returns `true` if a row was removed.
    ///
    /// Dashboards created by the user (and everything under them) go with
    /// it via the cascade on `dashboards.creator_id`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Read the current points balance.
    pub async fn get_points(pool: &PgPool, id: DbId) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT points FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Atomically add points, returning the new balance.
    ///
    /// Returns `None` if the user does not exist. The increment happens in
    /// a single UPDATE so concurrent requests cannot lose updates.
    pub async fn add_points(
        pool: &PgPool,
        id: DbId,
        amount: i64,
    ) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "UPDATE users SET points = points + $2, updated_at = NOW()
             WHERE id = $1
             RETURNING points",
        )
        .bind(id)
        .bind(amount)
        .fetch_optional(pool)
        .await
    }

    /// Atomically spend points, returning the new balance.
    ///
    /// The `points >= $2` guard is part of the UPDATE itself, so the
    /// balance can never go negative even under concurrent spends.
    /// Returns `None` when the user is missing or the balance is too low;
    /// the caller disambiguates with [`UserRepo::get_points`].
    pub async fn spend_points(
        pool: &PgPool,
        id: DbId,
        amount: i64,
    ) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "UPDATE users SET points = points - $2, updated_at = NOW()
             WHERE id = $1 AND points >= $2
             RETURNING points",
        )
        .bind(id)
        .bind(amount)
        .fetch_optional(pool)
        .await
    }
}
