//! Handlers for the `/points` ledger.
//!
//! Every balance change is a single atomic UPDATE in the repository; the
//! non-negative-balance invariant therefore holds even under concurrent
//! requests for the same user.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use taskflow_core::error::CoreError;
use taskflow_core::types::DbId;
use taskflow_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /points/add-points` and `/points/spend-points`.
#[derive(Debug, Deserialize)]
pub struct PointsRequest {
    pub user_id: DbId,
    pub amount: i64,
}

/// Balance response shared by all points endpoints.
#[derive(Debug, Serialize)]
pub struct PointsResponse {
    pub points: i64,
}

/// POST /api/v1/points/add-points
pub async fn add_points(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Json(input): Json<PointsRequest>,
) -> AppResult<Json<PointsResponse>> {
    validate_amount(input.amount)?;

    let points = UserRepo::add_points(&state.pool, input.user_id, input.amount)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: input.user_id,
        }))?;

    Ok(Json(PointsResponse { points }))
}

/// POST /api/v1/points/spend-points
///
/// Rejects a spend exceeding the current balance and leaves it unchanged.
pub async fn spend_points(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Json(input): Json<PointsRequest>,
) -> AppResult<Json<PointsResponse>> {
    validate_amount(input.amount)?;

    match UserRepo::spend_points(&state.pool, input.user_id, input.amount).await? {
        Some(points) => Ok(Json(PointsResponse { points })),
        // The conditional update matched no row: either the user is
        // missing or the balance is too low. One more read disambiguates.
        None => match UserRepo::get_points(&state.pool, input.user_id).await? {
            Some(balance) => Err(AppError::Core(CoreError::InsufficientPoints {
                balance,
                requested: input.amount,
            })),
            None => Err(AppError::Core(CoreError::NotFound {
                entity: "User",
                id: input.user_id,
            })),
        },
    }
}

/// GET /api/v1/points/{user_id}
pub async fn get_points(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<PointsResponse>> {
    let points = UserRepo::get_points(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;
    Ok(Json(PointsResponse { points }))
}

/// Amounts must be strictly positive for both add and spend.
fn validate_amount(amount: i64) -> AppResult<()> {
    if amount <= 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Amount must be a positive number".into(),
        )));
    }
    Ok(())
}
