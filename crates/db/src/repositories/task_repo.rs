//! Repository for the `tasks` table.

use sqlx::types::Json;
use sqlx::PgPool;
use taskflow_core::subtask::Subtask;
use taskflow_core::types::DbId;

use crate::models::task::{CreateTask, Task, UpdateTask};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, creator_id, panel_id, completed, due_by, \
                       description, subtasks, created_at, updated_at";

/// Provides CRUD operations for tasks and their embedded subtasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task, returning the created row.
    pub async fn create(
        pool: &PgPool,
        creator_id: DbId,
        input: &CreateTask,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (name, creator_id, panel_id, description, due_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(&input.name)
            .bind(creator_id)
            .bind(input.panel_id)
            .bind(&input.description)
            .bind(input.due_by)
            .fetch_one(pool)
            .await
    }

    /// Find a task by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the tasks of a panel in creation order.
    pub async fn list_by_panel(pool: &PgPool, panel_id: DbId) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE panel_id = $1 ORDER BY created_at");
        sqlx::query_as::<_, Task>(&query)
            .bind(panel_id)
            .fetch_all(pool)
            .await
    }

    /// Resolve the dashboard a task belongs to, via its panel.
    pub async fn dashboard_id(pool: &PgPool, task_id: DbId) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT p.dashboard_id FROM tasks t
             JOIN panels p ON p.id = t.panel_id
             WHERE t.id = $1",
        )
        .bind(task_id)
        .fetch_optional(pool)
        .await
    }

    /// Partially update a task. Only non-`None` fields are applied; a
    /// present `subtasks` list replaces the stored one wholesale.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                completed = COALESCE($4, completed),
                due_by = COALESCE($5, due_by),
                panel_id = COALESCE($6, panel_id),
                subtasks = COALESCE($7, subtasks),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.completed)
            .bind(input.due_by)
            .bind(input.panel_id)
            .bind(input.subtasks.as_ref().map(Json))
            .fetch_optional(pool)
            .await
    }

    /// Replace the embedded subtask list.
    ///
    /// Used by the index-addressed subtask operations after they mutate a
    /// copy in memory. Returns `None` if no row with the given `id` exists.
    pub async fn set_subtasks(
        pool: &PgPool,
        id: DbId,
        subtasks: &[Subtask],
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET subtasks = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(Json(subtasks))
            .fetch_optional(pool)
            .await
    }

    /// Flip the task-level completion flag.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn toggle_completed(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET completed = NOT completed, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a task. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
