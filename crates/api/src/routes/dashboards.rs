//! Route definitions for the `/dashboards` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboards`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::list).post(dashboard::create))
        .route(
            "/{id}",
            get(dashboard::get_by_id)
                .put(dashboard::update)
                .delete(dashboard::delete),
        )
        .route("/{id}/invite", post(dashboard::invite))
}
