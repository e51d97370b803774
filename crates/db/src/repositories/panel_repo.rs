//! Repository for the `panels` table.

use sqlx::PgPool;
use taskflow_core::types::DbId;

use crate::models::panel::{CreatePanel, Panel};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, creator_id, dashboard_id, created_at, updated_at";

/// Provides CRUD operations for panels.
pub struct PanelRepo;

impl PanelRepo {
    /// Insert a new panel, returning the created row.
    ///
    /// The dashboard foreign key rejects a nonexistent `dashboard_id`.
    pub async fn create(
        pool: &PgPool,
        creator_id: DbId,
        input: &CreatePanel,
    ) -> Result<Panel, sqlx::Error> {
        let query = format!(
            "INSERT INTO panels (name, creator_id, dashboard_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Panel>(&query)
            .bind(&input.name)
            .bind(creator_id)
            .bind(input.dashboard_id)
            .fetch_one(pool)
            .await
    }

    /// Find a panel by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Panel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM panels WHERE id = $1");
        sqlx::query_as::<_, Panel>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the panels of a dashboard in creation order.
    pub async fn list_by_dashboard(
        pool: &PgPool,
        dashboard_id: DbId,
    ) -> Result<Vec<Panel>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM panels WHERE dashboard_id = $1 ORDER BY created_at");
        sqlx::query_as::<_, Panel>(&query)
            .bind(dashboard_id)
            .fetch_all(pool)
            .await
    }

    /// Resolve the dashboard a panel belongs to.
    pub async fn dashboard_id(pool: &PgPool, panel_id: DbId) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT dashboard_id FROM panels WHERE id = $1")
            .bind(panel_id)
            .fetch_optional(pool)
            .await
    }

    /// Rename a panel. Returns `None` if no row with the given `id` exists.
    pub async fn rename(pool: &PgPool, id: DbId, name: &str) -> Result<Option<Panel>, sqlx::Error> {
        let query = format!(
            "UPDATE panels SET name = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Panel>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a panel. Returns `true` if a row was removed.
    /// Its tasks cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM panels WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
