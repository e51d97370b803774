//! Route definitions for the `/points` ledger.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::points;
use crate::state::AppState;

/// Routes mounted at `/points`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/add-points", post(points::add_points))
        .route("/spend-points", post(points::spend_points))
        .route("/{user_id}", get(points::get_points))
}
