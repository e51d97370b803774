//! Integration tests for the `/tasks` endpoints: CRUD, completion toggling,
//! embedded subtasks, and the derived completion percentage.

mod common;

use axum::http::{Method, StatusCode};
use axum::Router;
use serde_json::json;
use sqlx::PgPool;

use common::{body_json, build_test_app, delete, get, post_json, put_json, send, signup_and_login};
use taskflow_core::types::DbId;

async fn create_board_and_panel(app: &Router, token: &str) -> (DbId, DbId) {
    let response = post_json(
        app,
        "/api/v1/dashboards",
        Some(token),
        json!({ "name": "Board" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let board = body_json(response).await["id"]
        .as_i64()
        .expect("dashboard id");

    let response = post_json(
        app,
        "/api/v1/panels",
        Some(token),
        json!({ "name": "Backlog", "dashboard_id": board }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let panel = body_json(response).await["id"].as_i64().expect("panel id");

    (board, panel)
}

async fn create_task(app: &Router, token: &str, panel_id: DbId, name: &str) -> DbId {
    let response = post_json(
        app,
        "/api/v1/tasks",
        Some(token),
        json!({ "name": name, "panel_id": panel_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().expect("task id")
}

#[sqlx::test(migrations = "../db/migrations")]
async fn task_crud_flow(pool: PgPool) {
    let app = build_test_app(pool);
    let (_, token) = signup_and_login(&app, "alice").await;
    let (_, panel) = create_board_and_panel(&app, &token).await;

    let task = create_task(&app, &token, panel, "Write docs").await;

    let response = get(&app, &format!("/api/v1/tasks/{task}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Write docs");
    assert_eq!(body["completed"], false);
    assert_eq!(body["subtasks"], json!([]));
    assert_eq!(body["completion_percent"], 0);

    let response = put_json(
        &app,
        &format!("/api/v1/tasks/{task}"),
        &token,
        json!({ "name": "Write better docs", "description": "with examples" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Write better docs");
    assert_eq!(body["description"], "with examples");

    let response = get(&app, &format!("/api/v1/tasks/panel/{panel}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().map(Vec::len), Some(1));

    let response = delete(&app, &format!("/api/v1/tasks/{task}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(&app, &format!("/api/v1/tasks/{task}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn toggling_twice_restores_completion(pool: PgPool) {
    let app = build_test_app(pool);
    let (_, token) = signup_and_login(&app, "alice").await;
    let (_, panel) = create_board_and_panel(&app, &token).await;
    let task = create_task(&app, &token, panel, "Flip me").await;

    let toggle_uri = format!("/api/v1/tasks/{task}/toggle");

    let response = post_json(&app, &toggle_uri, Some(&token), json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["completed"], true);

    let response = post_json(&app, &toggle_uri, Some(&token), json!({})).await;
    assert_eq!(body_json(response).await["completed"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn subtask_lifecycle_drives_completion_percent(pool: PgPool) {
    let app = build_test_app(pool);
    let (_, token) = signup_and_login(&app, "alice").await;
    let (_, panel) = create_board_and_panel(&app, &token).await;
    let task = create_task(&app, &token, panel, "Checklist").await;

    // Three subtasks, none done.
    for title in ["design", "implement", "review"] {
        let response = post_json(
            &app,
            &format!("/api/v1/tasks/{task}/subtasks"),
            Some(&token),
            json!({ "title": title }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    // 1/3 done rounds to 33, 2/3 to 67, 3/3 is 100.
    let response = post_json(
        &app,
        &format!("/api/v1/tasks/{task}/subtasks/0/toggle"),
        Some(&token),
        json!({}),
    )
    .await;
    let body = body_json(response).await;
    assert_eq!(body["subtasks"][0]["completed"], true);
    assert_eq!(body["completion_percent"], 33);

    let response = post_json(
        &app,
        &format!("/api/v1/tasks/{task}/subtasks/1/toggle"),
        Some(&token),
        json!({}),
    )
    .await;
    assert_eq!(body_json(response).await["completion_percent"], 67);

    let response = post_json(
        &app,
        &format!("/api/v1/tasks/{task}/subtasks/2/toggle"),
        Some(&token),
        json!({}),
    )
    .await;
    assert_eq!(body_json(response).await["completion_percent"], 100);

    // Removing a subtask shifts later indices down.
    let response = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/tasks/{task}/subtasks/0"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["subtasks"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["subtasks"][0]["title"], "implement");
    assert_eq!(body["completion_percent"], 100);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn out_of_range_subtask_index_is_rejected(pool: PgPool) {
    let app = build_test_app(pool);
    let (_, token) = signup_and_login(&app, "alice").await;
    let (_, panel) = create_board_and_panel(&app, &token).await;
    let task = create_task(&app, &token, panel, "Checklist").await;

    let response = post_json(
        &app,
        &format!("/api/v1/tasks/{task}/subtasks/0/toggle"),
        Some(&token),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/tasks/{task}/subtasks/5"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_replaces_subtasks_wholesale(pool: PgPool) {
    let app = build_test_app(pool);
    let (_, token) = signup_and_login(&app, "alice").await;
    let (_, panel) = create_board_and_panel(&app, &token).await;
    let task = create_task(&app, &token, panel, "Checklist").await;

    post_json(
        &app,
        &format!("/api/v1/tasks/{task}/subtasks"),
        Some(&token),
        json!({ "title": "old item" }),
    )
    .await;

    let response = put_json(
        &app,
        &format!("/api/v1/tasks/{task}"),
        &token,
        json!({ "subtasks": [
            { "title": "fresh", "completed": true },
            { "title": "list" }
        ] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["subtasks"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["subtasks"][0]["title"], "fresh");
    assert_eq!(body["completion_percent"], 50);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn reassigning_panel_requires_target_membership(pool: PgPool) {
    let app = build_test_app(pool);
    let (_, alice) = signup_and_login(&app, "alice").await;
    let (_, bob) = signup_and_login(&app, "bob").await;

    let (_, alice_panel) = create_board_and_panel(&app, &alice).await;
    let (_, bob_panel) = create_board_and_panel(&app, &bob).await;
    let task = create_task(&app, &alice, alice_panel, "Movable").await;

    // Alice is not a member of Bob's board, so the move is forbidden.
    let response = put_json(
        &app,
        &format!("/api/v1/tasks/{task}"),
        &alice,
        json!({ "panel_id": bob_panel }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn tasks_are_membership_guarded(pool: PgPool) {
    let app = build_test_app(pool);
    let (_, alice) = signup_and_login(&app, "alice").await;
    let (_, mallory) = signup_and_login(&app, "mallory").await;
    let (_, panel) = create_board_and_panel(&app, &alice).await;
    let task = create_task(&app, &alice, panel, "Guarded").await;

    let response = get(&app, &format!("/api/v1/tasks/{task}"), &mallory).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json(
        &app,
        "/api/v1/tasks",
        Some(&mallory),
        json!({ "name": "Sneaky", "panel_id": panel }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete(&app, &format!("/api/v1/tasks/{task}"), &mallory).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // A missing task is 404 even for members.
    let response = get(&app, "/api/v1/tasks/999999", &alice).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
