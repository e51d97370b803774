//! Route definitions for the `/auth` resource.
//!
//! Signup and login are public; everything else authenticates via the
//! [`AuthUser`](crate::middleware::auth::AuthUser) extractor in its handler.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/verify-token", get(auth::verify_token))
        .route("/profile/{id}", get(auth::profile))
        .route("/userbyName/{username}", get(auth::user_by_name))
        .route("/update", put(auth::update_profile))
        .route("/delete", delete(auth::delete_account))
}
