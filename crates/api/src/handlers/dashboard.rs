//! Handlers for the `/dashboards` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use taskflow_core::error::CoreError;
use taskflow_core::types::DbId;
use taskflow_core::validation::{validate_description, validate_required_name};
use taskflow_db::models::dashboard::{CreateDashboard, Dashboard, UpdateDashboard};
use taskflow_db::repositories::{DashboardRepo, UserRepo};

use crate::access::{require_dashboard_creator, require_dashboard_member};
use crate::error::{map_unique_violation, AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Query parameters for `GET /dashboards`.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Optional; when present it must match the authenticated user.
    #[serde(rename = "userId")]
    pub user_id: Option<DbId>,
}

/// Request body for `POST /dashboards/{id}/invite`.
#[derive(Debug, Deserialize)]
pub struct InviteRequest {
    pub username: String,
}

/// GET /api/v1/dashboards
///
/// List every dashboard where the caller is creator or invited member.
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Dashboard>>> {
    if let Some(user_id) = query.user_id {
        if user_id != auth_user.user_id {
            return Err(AppError::Core(CoreError::Forbidden(
                "Cannot list dashboards for another user".into(),
            )));
        }
    }
    let dashboards = DashboardRepo::list_for_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(dashboards))
}

/// POST /api/v1/dashboards
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateDashboard>,
) -> AppResult<(StatusCode, Json<Dashboard>)> {
    validate_required_name(&input.name, "Dashboard name")?;
    if let Some(description) = &input.description {
        validate_description(description)?;
    }
    let dashboard = DashboardRepo::create(&state.pool, auth_user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(dashboard)))
}

/// GET /api/v1/dashboards/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Dashboard>> {
    require_dashboard_member(&state.pool, id, auth_user.user_id).await?;
    let dashboard = DashboardRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Dashboard",
            id,
        }))?;
    Ok(Json(dashboard))
}

/// PUT /api/v1/dashboards/{id}
///
/// Creator-only partial update. A present `invited_users` list replaces
/// the member set wholesale.
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDashboard>,
) -> AppResult<Json<Dashboard>> {
    require_dashboard_creator(&state.pool, id, auth_user.user_id).await?;
    if let Some(name) = &input.name {
        validate_required_name(name, "Dashboard name")?;
    }
    if let Some(description) = &input.description {
        validate_description(description)?;
    }
    let dashboard = DashboardRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Dashboard",
            id,
        }))?;
    Ok(Json(dashboard))
}

/// POST /api/v1/dashboards/{id}/invite
///
/// Creator-only. Check order: dashboard exists -> user exists -> not the
/// owner -> not already invited (the last enforced by the unique
/// constraint, so concurrent duplicate invites cannot both land).
pub async fn invite(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<InviteRequest>,
) -> AppResult<StatusCode> {
    require_dashboard_creator(&state.pool, id, auth_user.user_id).await?;

    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", input.username)))?;

    if user.id == auth_user.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "Cannot invite the dashboard owner".into(),
        )));
    }

    DashboardRepo::invite(&state.pool, id, user.id)
        .await
        .map_err(|e| {
            map_unique_violation(e, "uq_dashboard_invites_member", "User is already invited")
        })?;

    Ok(StatusCode::OK)
}

/// DELETE /api/v1/dashboards/{id}
///
/// Creator-only. Panels and tasks underneath cascade.
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require_dashboard_creator(&state.pool, id, auth_user.user_id).await?;
    let deleted = DashboardRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Dashboard",
            id,
        }))
    }
}
