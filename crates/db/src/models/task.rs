//! Task entity model and DTOs.
//!
//! Subtasks are embedded JSONB values on the task row -- a two-level
//! hierarchy (task -> subtask), never an arbitrarily deep tree.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use taskflow_core::subtask::Subtask;
use taskflow_core::types::{DbId, Timestamp};

/// A task row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub name: String,
    pub creator_id: DbId,
    pub panel_id: DbId,
    pub completed: bool,
    pub due_by: Option<Timestamp>,
    pub description: Option<String>,
    pub subtasks: Json<Vec<Subtask>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new task within a panel.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub name: String,
    pub panel_id: DbId,
    pub description: Option<String>,
    pub due_by: Option<Timestamp>,
}

/// DTO for partially updating a task.
///
/// When `subtasks` is present the embedded list is replaced wholesale,
/// not merged. Absent fields are left unchanged; there is no way to clear
/// `description` or `due_by` back to NULL through this DTO.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTask {
    pub name: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub due_by: Option<Timestamp>,
    pub panel_id: Option<DbId>,
    pub subtasks: Option<Vec<Subtask>>,
}
