//! Handlers for the `/tasks` resource, including index-addressed subtask
//! operations and the derived completion percentage.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use taskflow_core::error::CoreError;
use taskflow_core::subtask;
use taskflow_core::types::DbId;
use taskflow_core::validation::validate_required_name;
use taskflow_db::models::task::{CreateTask, Task, UpdateTask};
use taskflow_db::repositories::TaskRepo;

use crate::access::{require_panel_member, require_task_member};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// A task as returned by the API: the row plus its derived completion
/// percentage (`round(100 * done / total)`, 0 for an empty checklist).
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    #[serde(flatten)]
    pub task: Task,
    pub completion_percent: u8,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        let completion_percent = subtask::completion_percent(&task.subtasks);
        Self {
            task,
            completion_percent,
        }
    }
}

/// Request body for `POST /tasks/{id}/subtasks`.
#[derive(Debug, Deserialize)]
pub struct AddSubtaskRequest {
    pub title: String,
}

/// GET /api/v1/tasks/panel/{panel_id}
pub async fn list_by_panel(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(panel_id): Path<DbId>,
) -> AppResult<Json<Vec<TaskResponse>>> {
    require_panel_member(&state.pool, panel_id, auth_user.user_id).await?;
    let tasks = TaskRepo::list_by_panel(&state.pool, panel_id).await?;
    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// GET /api/v1/tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<TaskResponse>> {
    require_task_member(&state.pool, id, auth_user.user_id).await?;
    let task = fetch_task(&state, id).await?;
    Ok(Json(task.into()))
}

/// POST /api/v1/tasks
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<TaskResponse>)> {
    validate_required_name(&input.name, "Task name")?;
    require_panel_member(&state.pool, input.panel_id, auth_user.user_id).await?;
    let task = TaskRepo::create(&state.pool, auth_user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(task.into())))
}

/// PUT /api/v1/tasks/{id}
///
/// Partial update. A present `subtasks` list replaces the stored one
/// wholesale. Reassigning `panel_id` requires membership of the target
/// panel's dashboard as well.
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<TaskResponse>> {
    require_task_member(&state.pool, id, auth_user.user_id).await?;
    if let Some(name) = &input.name {
        validate_required_name(name, "Task name")?;
    }
    if let Some(target_panel) = input.panel_id {
        require_panel_member(&state.pool, target_panel, auth_user.user_id).await?;
    }
    let task = TaskRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(task.into()))
}

/// POST /api/v1/tasks/{id}/toggle
pub async fn toggle_completed(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<TaskResponse>> {
    require_task_member(&state.pool, id, auth_user.user_id).await?;
    let task = TaskRepo::toggle_completed(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(task.into()))
}

/// POST /api/v1/tasks/{id}/subtasks
pub async fn add_subtask(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<AddSubtaskRequest>,
) -> AppResult<Json<TaskResponse>> {
    require_task_member(&state.pool, id, auth_user.user_id).await?;
    let task = fetch_task(&state, id).await?;

    let mut subtasks = task.subtasks.0;
    subtask::add_subtask(&mut subtasks, &input.title)?;
    store_subtasks(&state, id, subtasks).await
}

/// POST /api/v1/tasks/{id}/subtasks/{index}/toggle
pub async fn toggle_subtask(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((id, index)): Path<(DbId, usize)>,
) -> AppResult<Json<TaskResponse>> {
    require_task_member(&state.pool, id, auth_user.user_id).await?;
    let task = fetch_task(&state, id).await?;

    let mut subtasks = task.subtasks.0;
    subtask::toggle_subtask(&mut subtasks, index)?;
    store_subtasks(&state, id, subtasks).await
}

/// DELETE /api/v1/tasks/{id}/subtasks/{index}
pub async fn remove_subtask(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((id, index)): Path<(DbId, usize)>,
) -> AppResult<Json<TaskResponse>> {
    require_task_member(&state.pool, id, auth_user.user_id).await?;
    let task = fetch_task(&state, id).await?;

    let mut subtasks = task.subtasks.0;
    subtask::remove_subtask(&mut subtasks, index)?;
    store_subtasks(&state, id, subtasks).await
}

/// DELETE /api/v1/tasks/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require_task_member(&state.pool, id, auth_user.user_id).await?;
    let deleted = TaskRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Task", id }))
    }
}

async fn fetch_task(state: &AppState, id: DbId) -> AppResult<Task> {
    TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))
}

async fn store_subtasks(
    state: &AppState,
    id: DbId,
    subtasks: Vec<taskflow_core::subtask::Subtask>,
) -> AppResult<Json<TaskResponse>> {
    let task = TaskRepo::set_subtasks(&state.pool, id, &subtasks)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(task.into()))
}
