//! Repository for the `dashboards` table and its invite membership.

use sqlx::PgPool;
use taskflow_core::types::DbId;

use crate::models::dashboard::{CreateDashboard, Dashboard, UpdateDashboard};

/// SELECT body shared by every query that returns a full dashboard with
/// its aggregated invited member ids.
const SELECT_DASHBOARD: &str = "SELECT d.id, d.name, d.description, d.creator_id,
        COALESCE(ARRAY_AGG(di.user_id ORDER BY di.invited_at)
                 FILTER (WHERE di.user_id IS NOT NULL), '{}') AS invited_users,
        d.created_at, d.updated_at
     FROM dashboards d
     LEFT JOIN dashboard_invites di ON di.dashboard_id = d.id";

/// Provides CRUD and membership operations for dashboards.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Insert a new dashboard owned by `creator_id`.
    pub async fn create(
        pool: &PgPool,
        creator_id: DbId,
        input: &CreateDashboard,
    ) -> Result<Dashboard, sqlx::Error> {
        sqlx::query_as::<_, Dashboard>(
            "INSERT INTO dashboards (name, description, creator_id)
             VALUES ($1, $2, $3)
             RETURNING id, name, description, creator_id,
                       ARRAY[]::BIGINT[] AS invited_users, created_at, updated_at",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(creator_id)
        .fetch_one(pool)
        .await
    }

    /// Find a dashboard by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Dashboard>, sqlx::Error> {
        let query = format!("{SELECT_DASHBOARD} WHERE d.id = $1 GROUP BY d.id");
        sqlx::query_as::<_, Dashboard>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every dashboard where the user is the creator or an invited
    /// member, most recently created first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Dashboard>, sqlx::Error> {
        let query = format!(
            "{SELECT_DASHBOARD}
             WHERE d.creator_id = $1
                OR EXISTS (SELECT 1 FROM dashboard_invites m
                           WHERE m.dashboard_id = d.id AND m.user_id = $1)
             GROUP BY d.id
             ORDER BY d.created_at DESC"
        );
        sqlx::query_as::<_, Dashboard>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Check whether `user_id` is the creator or an invited member.
    ///
    /// Returns `None` if the dashboard does not exist, so callers can
    /// distinguish "not found" from "not a member".
    pub async fn membership(
        pool: &PgPool,
        dashboard_id: DbId,
        user_id: DbId,
    ) -> Result<Option<bool>, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT d.creator_id = $2
                OR EXISTS (SELECT 1 FROM dashboard_invites m
                           WHERE m.dashboard_id = d.id AND m.user_id = $2)
             FROM dashboards d WHERE d.id = $1",
        )
        .bind(dashboard_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// Partially update a dashboard. Only non-`None` fields are applied;
    /// when `invited_users` is present the member set is replaced
    /// wholesale inside a single transaction.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDashboard,
    ) -> Result<Option<Dashboard>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let updated = sqlx::query_scalar::<_, DbId>(
            "UPDATE dashboards SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_at = NOW()
             WHERE id = $1
             RETURNING creator_id",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(creator_id) = updated else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some(members) = &input.invited_users {
            sqlx::query("DELETE FROM dashboard_invites WHERE dashboard_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            for &user_id in members {
                // The creator is never an invited member of their own board.
                if user_id == creator_id {
                    continue;
                }
                sqlx::query(
                    "INSERT INTO dashboard_invites (dashboard_id, user_id)
                     VALUES ($1, $2)
                     ON CONFLICT ON CONSTRAINT uq_dashboard_invites_member DO NOTHING",
                )
                .bind(id)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Self::find_by_id(pool, id).await
    }

    /// Add a single invited member.
    ///
    /// A duplicate invite surfaces as a unique violation on
    /// `uq_dashboard_invites_member`; the caller classifies that as a
    /// conflict. Owner and existence checks happen in the handler before
    /// this runs.
    pub async fn invite(
        pool: &PgPool,
        dashboard_id: DbId,
        user_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO dashboard_invites (dashboard_id, user_id) VALUES ($1, $2)")
            .bind(dashboard_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Hard-delete a dashboard. Returns `true` if a row was removed.
    ///
    /// Panels, tasks, and invites underneath it cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM dashboards WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
