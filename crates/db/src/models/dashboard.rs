//! Dashboard entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskflow_core::types::{DbId, Timestamp};

/// A dashboard row together with its aggregated invited member ids.
///
/// `invited_users` is populated from the `dashboard_invites` join table;
/// the creator is never part of it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Dashboard {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub creator_id: DbId,
    pub invited_users: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new dashboard. The creator comes from the
/// authenticated request, not the body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDashboard {
    pub name: String,
    pub description: Option<String>,
}

/// DTO for partially updating a dashboard.
///
/// When `invited_users` is present the member set is replaced wholesale,
/// not merged. Absent fields are left unchanged; there is no way to clear
/// `description` back to NULL through this DTO.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDashboard {
    pub name: Option<String>,
    pub description: Option<String>,
    pub invited_users: Option<Vec<DbId>>,
}
