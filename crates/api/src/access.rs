//! Dashboard-scoped access control.
//!
//! Every read on a dashboard, panel, or task requires the acting user to
//! satisfy the membership predicate (creator OR invited). Membership
//! mutation (invite) and dashboard update/delete are creator-only; there
//! is no further role distinction between creator and invited member.

use sqlx::PgPool;
use taskflow_core::error::CoreError;
use taskflow_core::types::DbId;

use crate::error::{AppError, AppResult};
use taskflow_db::repositories::{DashboardRepo, PanelRepo, TaskRepo};

/// Require that `user_id` is a member (creator or invited) of the dashboard.
pub async fn require_dashboard_member(
    pool: &PgPool,
    dashboard_id: DbId,
    user_id: DbId,
) -> AppResult<()> {
    match DashboardRepo::membership(pool, dashboard_id, user_id).await? {
        None => Err(AppError::Core(CoreError::NotFound {
            entity: "Dashboard",
            id: dashboard_id,
        })),
        Some(false) => Err(AppError::Core(CoreError::Forbidden(
            "You are not a member of this dashboard".into(),
        ))),
        Some(true) => Ok(()),
    }
}

/// Require that `user_id` created the dashboard.
pub async fn require_dashboard_creator(
    pool: &PgPool,
    dashboard_id: DbId,
    user_id: DbId,
) -> AppResult<()> {
    let dashboard = DashboardRepo::find_by_id(pool, dashboard_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Dashboard",
            id: dashboard_id,
        }))?;
    if dashboard.creator_id != user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the dashboard creator may do this".into(),
        )));
    }
    Ok(())
}

/// Require membership of the dashboard that owns the panel.
///
/// Returns the owning dashboard id on success.
pub async fn require_panel_member(
    pool: &PgPool,
    panel_id: DbId,
    user_id: DbId,
) -> AppResult<DbId> {
    let dashboard_id =
        PanelRepo::dashboard_id(pool, panel_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Panel",
                id: panel_id,
            }))?;
    require_dashboard_member(pool, dashboard_id, user_id).await?;
    Ok(dashboard_id)
}

/// Require membership of the dashboard that owns the task (via its panel).
pub async fn require_task_member(pool: &PgPool, task_id: DbId, user_id: DbId) -> AppResult<()> {
    let dashboard_id =
        TaskRepo::dashboard_id(pool, task_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Task",
                id: task_id,
            }))?;
    require_dashboard_member(pool, dashboard_id, user_id).await
}
