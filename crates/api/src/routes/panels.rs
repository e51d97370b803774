//! Route definitions for the `/panels` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::panel;
use crate::state::AppState;

/// Routes mounted at `/panels`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(panel::list).post(panel::create))
        .route(
            "/{id}",
            get(panel::get_by_id)
                .put(panel::update)
                .delete(panel::delete),
        )
}
