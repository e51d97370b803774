//! Handlers for the `/auth` resource (signup, login, profile management).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use taskflow_core::error::CoreError;
use taskflow_core::types::DbId;
use taskflow_core::validation::validate_username;
use taskflow_db::models::user::{CreateUser, UpdateUser, UserResponse};
use taskflow_db::repositories::UserRepo;

use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{map_unique_violation, AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `PUT /auth/update`. Both fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Successful authentication response returned by login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Response for `GET /auth/verify-token`.
#[derive(Debug, Serialize)]
pub struct VerifyTokenResponse {
    pub valid: bool,
    pub user_id: DbId,
}

/// Response for `GET /auth/profile/{id}`.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub username: String,
    pub points: i64,
}

/// Response for `GET /auth/userbyName/{username}`.
#[derive(Debug, Serialize)]
pub struct ResolvedUser {
    pub id: DbId,
    pub username: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Register a new user. Username uniqueness is enforced by the database
/// constraint, not a read-then-write check, so concurrent signups of the
/// same name cannot both succeed.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    validate_username(&input.username)?;
    validate_password_strength(&input.password, state.config.min_password_length)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            password_hash,
        },
    )
    .await
    .map_err(|e| map_unique_violation(e, "uq_users_username", "Username already exists"))?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /api/v1/auth/login
///
/// Authenticate with username + password and issue a bearer token.
/// Unknown username and wrong password yield the same message so the
/// endpoint cannot be used for username enumeration.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid_credentials());
    }

    let token = generate_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(Json(AuthResponse {
        token,
        expires_in: state.config.jwt.expiry_mins * 60,
        user: user.into(),
    }))
}

/// GET /api/v1/auth/verify-token
///
/// Stateless token validation; the extractor does the actual work.
pub async fn verify_token(auth_user: AuthUser) -> Json<VerifyTokenResponse> {
    Json(VerifyTokenResponse {
        valid: true,
        user_id: auth_user.user_id,
    })
}

/// GET /api/v1/auth/profile/{id}
pub async fn profile(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProfileResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(ProfileResponse {
        username: user.username,
        points: user.points,
    }))
}

/// GET /api/v1/auth/userbyName/{username}
///
/// Resolve a username to a user id. Consumed by the dashboard invite flow.
pub async fn user_by_name(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(username): Path<String>,
) -> AppResult<Json<ResolvedUser>> {
    let user = UserRepo::find_by_username(&state.pool, &username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {username} not found")))?;
    Ok(Json(ResolvedUser {
        id: user.id,
        username: user.username,
    }))
}

/// PUT /api/v1/auth/update
///
/// Partial profile update for the authenticated user. A new username must
/// be unique among *other* users; renaming to one's current name is a
/// no-op, not an error (the unique constraint ignores the user's own row).
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    if let Some(username) = &input.username {
        validate_username(username)?;
    }
    let password_hash = match &input.password {
        Some(password) => {
            validate_password_strength(password, state.config.min_password_length)
                .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
            Some(
                hash_password(password)
                    .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?,
            )
        }
        None => None,
    };

    let user = UserRepo::update(
        &state.pool,
        auth_user.user_id,
        &UpdateUser {
            username: input.username,
            password_hash,
        },
    )
    .await
    .map_err(|e| map_unique_violation(e, "uq_users_username", "Username already exists"))?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "User",
        id: auth_user.user_id,
    }))?;

    Ok(Json(user.into()))
}

/// DELETE /api/v1/auth/delete
///
/// Delete the authenticated user's account. Dashboards they created (and
/// everything under them) cascade.
pub async fn delete_account(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<StatusCode> {
    let deleted = UserRepo::delete(&state.pool, auth_user.user_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        }))
    }
}

/// The one credential-failure message, shared by unknown-user and
/// wrong-password paths.
fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid username or password".into(),
    ))
}
