//! Panel entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskflow_core::types::{DbId, Timestamp};

use crate::models::task::Task;

/// A panel row from the `panels` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Panel {
    pub id: DbId,
    pub name: String,
    pub creator_id: DbId,
    pub dashboard_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A panel together with its child tasks, for populated listings.
#[derive(Debug, Clone, Serialize)]
pub struct PanelWithTasks {
    #[serde(flatten)]
    pub panel: Panel,
    pub tasks: Vec<Task>,
}

/// DTO for creating a new panel within a dashboard.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePanel {
    pub name: String,
    pub dashboard_id: DbId,
}

/// DTO for renaming a panel. The name is required and non-empty.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePanel {
    pub name: String,
}
