use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool -- the single source of truth; there is no
    /// in-process cache in front of it.
    pub pool: taskflow_db::DbPool,
    /// Server configuration (JWT secret, password policy, timeouts).
    pub config: Arc<ServerConfig>,
}
