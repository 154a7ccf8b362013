//! User resource handlers

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};

use crate::{
    error::{ApiError, is_unique_violation},
    models::user::{
        CreateUserRequest, LinkUserMotivationRequest, UnlinkUserMotivationRequest,
        UpdateUserRequest, UserResponse,
    },
    state::AppState,
};

/// Routes for the users resource
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/:id/link-motivation/:motivation_id", post(link_motivation))
        .route("/:id/unlink-motivation", post(unlink_motivation))
        .route("/link-motivation", post(link_motivation_by_body))
        .route("/unlink-motivation", post(unlink_motivation_by_body))
}

/// Get all users
pub async fn get_users(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let users = state.user_repository.get_all().await.map_err(|e| {
        tracing::error!("Failed to get users: {}", e);
        ApiError::InternalServerError
    })?;

    Ok(Json(users))
}

/// Get a user by ID
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .user_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get user: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or_else(|| ApiError::NotFound(format!("User with ID {id} not found.")))?;

    Ok(Json(user))
}

/// Create a new user
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    ensure_motivation_exists(&state, payload.motivation_id).await?;

    let user = state.user_repository.create(&payload).await.map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::Conflict("A user with this email already exists.".to_string())
        } else {
            tracing::error!("Failed to create user: {}", e);
            ApiError::InternalServerError
        }
    })?;

    Ok(created(user))
}

/// Update an existing user
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // A missing target id is reported before any check on the patch fields
    let user_exists = state.user_repository.exists(id).await.map_err(|e| {
        tracing::error!("Failed to check user existence: {}", e);
        ApiError::InternalServerError
    })?;

    if !user_exists {
        return Err(ApiError::NotFound(format!("User with ID {id} not found.")));
    }

    ensure_motivation_exists(&state, payload.motivation_id).await?;

    let user = state
        .user_repository
        .update(id, &payload)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::Conflict("A user with this email already exists.".to_string())
            } else {
                tracing::error!("Failed to update user: {}", e);
                ApiError::InternalServerError
            }
        })?
        .ok_or_else(|| ApiError::NotFound(format!("User with ID {id} not found.")))?;

    Ok(Json(user))
}

/// Delete a user; the store cascades the user's journals
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state.user_repository.delete(id).await.map_err(|e| {
        tracing::error!("Failed to delete user: {}", e);
        ApiError::InternalServerError
    })?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("User with ID {id} not found.")))
    }
}

/// Link a user to a motivation
pub async fn link_motivation(
    State(state): State<AppState>,
    Path((id, motivation_id)): Path<(i32, i32)>,
) -> Result<Json<UserResponse>, ApiError> {
    let user_exists = state.user_repository.exists(id).await.map_err(|e| {
        tracing::error!("Failed to check user existence: {}", e);
        ApiError::InternalServerError
    })?;

    if !user_exists {
        return Err(ApiError::NotFound(format!("User with ID {id} not found.")));
    }

    ensure_motivation_exists(&state, Some(motivation_id)).await?;

    let user = state
        .user_repository
        .set_motivation(id, Some(motivation_id))
        .await
        .map_err(|e| {
            tracing::error!("Failed to link user to motivation: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or_else(|| ApiError::NotFound(format!("User with ID {id} not found.")))?;

    Ok(Json(user))
}

/// Unlink a user from their motivation; clearing the foreign key is always
/// valid, so no motivation lookup is needed
pub async fn unlink_motivation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .user_repository
        .set_motivation(id, None)
        .await
        .map_err(|e| {
            tracing::error!("Failed to unlink user from motivation: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or_else(|| ApiError::NotFound(format!("User with ID {id} not found.")))?;

    Ok(Json(user))
}

/// Link a user to a motivation using a request body
pub async fn link_motivation_by_body(
    state: State<AppState>,
    Json(payload): Json<LinkUserMotivationRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    link_motivation(state, Path((payload.user_id, payload.motivation_id))).await
}

/// Unlink a user from their motivation using a request body
pub async fn unlink_motivation_by_body(
    state: State<AppState>,
    Json(payload): Json<UnlinkUserMotivationRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    unlink_motivation(state, Path(payload.user_id)).await
}

async fn ensure_motivation_exists(
    state: &AppState,
    motivation_id: Option<i32>,
) -> Result<(), ApiError> {
    let Some(motivation_id) = motivation_id else {
        return Ok(());
    };

    let exists = state
        .motivation_repository
        .exists(motivation_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check motivation existence: {}", e);
            ApiError::InternalServerError
        })?;

    if exists {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!(
            "Motivation with ID {motivation_id} does not exist."
        )))
    }
}

fn created(user: UserResponse) -> impl IntoResponse {
    let location = format!("/api/users/{}", user.id);
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(user),
    )
}
