//! Route definitions for the `/tasks` resource and its embedded subtasks.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::task;
use crate::state::AppState;

/// Routes mounted at `/tasks`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(task::create))
        .route("/panel/{panel_id}", get(task::list_by_panel))
        .route(
            "/{id}",
            get(task::get_by_id).put(task::update).delete(task::delete),
        )
        .route("/{id}/toggle", post(task::toggle_completed))
        .route("/{id}/subtasks", post(task::add_subtask))
        .route("/{id}/subtasks/{index}/toggle", post(task::toggle_subtask))
        .route("/{id}/subtasks/{index}", delete(task::remove_subtask))
}
