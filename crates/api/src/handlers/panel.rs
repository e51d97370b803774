//! Handlers for the `/panels` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use taskflow_core::error::CoreError;
use taskflow_core::types::DbId;
use taskflow_core::validation::validate_required_name;
use taskflow_db::models::panel::{CreatePanel, Panel, PanelWithTasks, UpdatePanel};
use taskflow_db::repositories::{PanelRepo, TaskRepo};

use crate::access::{require_dashboard_member, require_panel_member};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Query parameters for `GET /panels`.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "dashboardId")]
    pub dashboard_id: DbId,
    /// When true, each panel carries its child tasks.
    #[serde(default)]
    pub include_tasks: bool,
}

/// Panel listing, either bare or populated with child tasks.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PanelListing {
    Bare(Vec<Panel>),
    Populated(Vec<PanelWithTasks>),
}

/// GET /api/v1/panels?dashboardId=...
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<PanelListing>> {
    require_dashboard_member(&state.pool, query.dashboard_id, auth_user.user_id).await?;
    let panels = PanelRepo::list_by_dashboard(&state.pool, query.dashboard_id).await?;

    if !query.include_tasks {
        return Ok(Json(PanelListing::Bare(panels)));
    }

    let mut populated = Vec::with_capacity(panels.len());
    for panel in panels {
        let tasks = TaskRepo::list_by_panel(&state.pool, panel.id).await?;
        populated.push(PanelWithTasks { panel, tasks });
    }
    Ok(Json(PanelListing::Populated(populated)))
}

/// POST /api/v1/panels
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreatePanel>,
) -> AppResult<(StatusCode, Json<Panel>)> {
    validate_required_name(&input.name, "Panel name")?;
    require_dashboard_member(&state.pool, input.dashboard_id, auth_user.user_id).await?;
    let panel = PanelRepo::create(&state.pool, auth_user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(panel)))
}

/// GET /api/v1/panels/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Panel>> {
    require_panel_member(&state.pool, id, auth_user.user_id).await?;
    let panel = PanelRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Panel", id }))?;
    Ok(Json(panel))
}

/// PUT /api/v1/panels/{id}
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePanel>,
) -> AppResult<Json<Panel>> {
    validate_required_name(&input.name, "Panel name")?;
    require_panel_member(&state.pool, id, auth_user.user_id).await?;
    let panel = PanelRepo::rename(&state.pool, id, &input.name)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Panel", id }))?;
    Ok(Json(panel))
}

/// DELETE /api/v1/panels/{id}
///
/// Any dashboard member may delete a panel; its tasks cascade.
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require_panel_member(&state.pool, id, auth_user.user_id).await?;
    let deleted = PanelRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Panel", id }))
    }
}
