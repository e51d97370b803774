//! Route definitions, one module per resource.

pub mod auth;
pub mod dashboards;
pub mod health;
pub mod panels;
pub mod points;
pub mod tasks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/signup                    signup (public)
/// /auth/login                     login (public)
/// /auth/verify-token              validate bearer token
/// /auth/profile/{id}              fetch {username, points}
/// /auth/userbyName/{username}     resolve username -> user
/// /auth/update                    update username/password
/// /auth/delete                    delete account
///
/// /dashboards                     list, create
/// /dashboards/{id}                get, update, delete
/// /dashboards/{id}/invite         invite by username (POST)
///
/// /panels?dashboardId=            list (optionally with tasks)
/// /panels                         create
/// /panels/{id}                    get, update, delete
///
/// /tasks/panel/{panel_id}         list tasks in panel
/// /tasks                          create
/// /tasks/{id}                     get, update, delete
/// /tasks/{id}/toggle              flip completed (POST)
/// /tasks/{id}/subtasks            append subtask (POST)
/// /tasks/{id}/subtasks/{i}/toggle flip subtask (POST)
/// /tasks/{id}/subtasks/{i}        remove subtask (DELETE)
///
/// /points/add-points              add to balance (POST)
/// /points/spend-points            deduct from balance (POST)
/// /points/{user_id}               read balance
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/dashboards", dashboards::router())
        .nest("/panels", panels::router())
        .nest("/tasks", tasks::router())
        .nest("/points", points::router())
}
