//! Integration tests for the `/dashboards` endpoints: CRUD, invites, and
//! the access-control matrix (creator vs member vs outsider).

mod common;

use axum::http::StatusCode;
use axum::Router;
use serde_json::json;
use sqlx::PgPool;

use common::{body_json, build_test_app, delete, get, post_json, put_json, signup_and_login};
use taskflow_core::types::DbId;

async fn create_dashboard(app: &Router, token: &str, name: &str) -> DbId {
    let response = post_json(
        app,
        "/api/v1/dashboards",
        Some(token),
        json!({ "name": name, "description": "team board" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"]
        .as_i64()
        .expect("dashboard id")
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_and_fetch_dashboard(pool: PgPool) {
    let app = build_test_app(pool);
    let (user_id, token) = signup_and_login(&app, "alice").await;

    let id = create_dashboard(&app, &token, "Sprint 12").await;

    let response = get(&app, &format!("/api/v1/dashboards/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Sprint 12");
    assert_eq!(body["creator_id"], user_id);
    assert_eq!(body["invited_users"], json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_rejects_blank_name_and_long_description(pool: PgPool) {
    let app = build_test_app(pool);
    let (_, token) = signup_and_login(&app, "alice").await;

    let response = post_json(
        &app,
        "/api/v1/dashboards",
        Some(&token),
        json!({ "name": "   " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        &app,
        "/api/v1/dashboards",
        Some(&token),
        json!({ "name": "ok", "description": "x".repeat(101) }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn listing_follows_membership(pool: PgPool) {
    let app = build_test_app(pool);
    let (_, alice) = signup_and_login(&app, "alice").await;
    let (_, bob) = signup_and_login(&app, "bob").await;

    let board = create_dashboard(&app, &alice, "Shared").await;
    create_dashboard(&app, &alice, "Private").await;

    // Before the invite Bob sees nothing.
    let response = get(&app, "/api/v1/dashboards", &bob).await;
    assert_eq!(body_json(response).await, json!([]));

    let response = post_json(
        &app,
        &format!("/api/v1/dashboards/{board}/invite"),
        Some(&alice),
        json!({ "username": "bob" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Bob now sees exactly the shared board; Alice sees both.
    let response = get(&app, "/api/v1/dashboards", &bob).await;
    let listing = body_json(response).await;
    let listing = listing.as_array().expect("array listing");
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0]["name"], "Shared");

    let response = get(&app, "/api/v1/dashboards", &alice).await;
    assert_eq!(body_json(response).await.as_array().map(Vec::len), Some(2));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn listing_for_another_user_is_forbidden(pool: PgPool) {
    let app = build_test_app(pool);
    let (alice_id, _) = signup_and_login(&app, "alice").await;
    let (_, bob) = signup_and_login(&app, "bob").await;

    let response = get(&app, &format!("/api/v1/dashboards?userId={alice_id}"), &bob).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn outsiders_cannot_view_a_dashboard(pool: PgPool) {
    let app = build_test_app(pool);
    let (_, alice) = signup_and_login(&app, "alice").await;
    let (_, mallory) = signup_and_login(&app, "mallory").await;

    let board = create_dashboard(&app, &alice, "Secret").await;

    let response = get(&app, &format!("/api/v1/dashboards/{board}"), &mallory).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // A missing board is 404, not 403.
    let response = get(&app, "/api/v1/dashboards/999999", &mallory).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_is_creator_only_and_replaces_invites(pool: PgPool) {
    let app = build_test_app(pool);
    let (_, alice) = signup_and_login(&app, "alice").await;
    let (_, bob) = signup_and_login(&app, "bob").await;
    let (carol_id, _) = signup_and_login(&app, "carol").await;

    let board = create_dashboard(&app, &alice, "Board").await;
    post_json(
        &app,
        &format!("/api/v1/dashboards/{board}/invite"),
        Some(&alice),
        json!({ "username": "bob" }),
    )
    .await;

    // Invited members cannot update.
    let response = put_json(
        &app,
        &format!("/api/v1/dashboards/{board}"),
        &bob,
        json!({ "name": "Hijacked" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The creator's invited_users list replaces the member set wholesale.
    let response = put_json(
        &app,
        &format!("/api/v1/dashboards/{board}"),
        &alice,
        json!({ "name": "Renamed", "invited_users": [carol_id] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Renamed");
    assert_eq!(body["invited_users"], json!([carol_id]));

    // Bob lost access with the replacement.
    let response = get(&app, &format!("/api/v1/dashboards/{board}"), &bob).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_with_unknown_invitee_id_is_rejected(pool: PgPool) {
    let app = build_test_app(pool);
    let (_, alice) = signup_and_login(&app, "alice").await;
    let (bob_id, _) = signup_and_login(&app, "bob").await;

    let board = create_dashboard(&app, &alice, "Board").await;

    // An id with no user row behind it is bad input, not a server fault.
    let response = put_json(
        &app,
        &format!("/api/v1/dashboards/{board}"),
        &alice,
        json!({ "invited_users": [999999] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    // The failed update must not have touched the member set.
    let response = put_json(
        &app,
        &format!("/api/v1/dashboards/{board}"),
        &alice,
        json!({ "invited_users": [bob_id] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["invited_users"], json!([bob_id]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invite_error_matrix(pool: PgPool) {
    let app = build_test_app(pool);
    let (_, alice) = signup_and_login(&app, "alice").await;
    let (_, bob) = signup_and_login(&app, "bob").await;

    let board = create_dashboard(&app, &alice, "Board").await;
    let invite_uri = format!("/api/v1/dashboards/{board}/invite");

    // Unknown username.
    let response = post_json(&app, &invite_uri, Some(&alice), json!({ "username": "ghost" })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Inviting the owner.
    let response = post_json(&app, &invite_uri, Some(&alice), json!({ "username": "alice" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // First invite succeeds, repeating it conflicts.
    let response = post_json(&app, &invite_uri, Some(&alice), json!({ "username": "bob" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = post_json(&app, &invite_uri, Some(&alice), json!({ "username": "bob" })).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["error"], "User is already invited");

    // Members cannot invite; only the creator can.
    let response = post_json(&app, &invite_uri, Some(&bob), json!({ "username": "bob" })).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_is_creator_only(pool: PgPool) {
    let app = build_test_app(pool);
    let (_, alice) = signup_and_login(&app, "alice").await;
    let (_, bob) = signup_and_login(&app, "bob").await;

    let board = create_dashboard(&app, &alice, "Board").await;
    post_json(
        &app,
        &format!("/api/v1/dashboards/{board}/invite"),
        Some(&alice),
        json!({ "username": "bob" }),
    )
    .await;

    let response = delete(&app, &format!("/api/v1/dashboards/{board}"), &bob).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete(&app, &format!("/api/v1/dashboards/{board}"), &alice).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(&app, &format!("/api/v1/dashboards/{board}"), &alice).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
