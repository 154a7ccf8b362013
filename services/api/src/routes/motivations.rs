//! Motivation resource handlers

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};

use crate::{
    error::ApiError,
    models::motivation::{CreateMotivationRequest, UpdateMotivationRequest},
    state::AppState,
};

/// Routes for the motivations resource
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_motivations).post(create_motivation))
        .route(
            "/:id",
            get(get_motivation)
                .put(update_motivation)
                .delete(delete_motivation),
        )
        .route("/:id/biohacks", get(get_biohacks_by_motivation))
}

/// Get all motivations
pub async fn get_motivations(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let motivations = state.motivation_repository.get_all().await.map_err(|e| {
        tracing::error!("Failed to get motivations: {}", e);
        ApiError::InternalServerError
    })?;

    Ok(Json(motivations))
}

/// Get a motivation by ID
pub async fn get_motivation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let motivation = state
        .motivation_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get motivation: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or_else(|| ApiError::NotFound(format!("Motivation with ID {id} not found.")))?;

    Ok(Json(motivation))
}

/// Get all biohacks linked to a motivation
pub async fn get_biohacks_by_motivation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let exists = state.motivation_repository.exists(id).await.map_err(|e| {
        tracing::error!("Failed to check motivation existence: {}", e);
        ApiError::InternalServerError
    })?;

    if !exists {
        return Err(ApiError::NotFound(format!(
            "Motivation with ID {id} not found."
        )));
    }

    let biohacks = state
        .motivation_biohack_repository
        .biohacks_by_motivation(id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get biohacks for motivation: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(biohacks))
}

/// Create a new motivation
pub async fn create_motivation(
    State(state): State<AppState>,
    Json(payload): Json<CreateMotivationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let motivation = state
        .motivation_repository
        .create(&payload)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create motivation: {}", e);
            ApiError::InternalServerError
        })?;

    let location = format!("/api/motivations/{}", motivation.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(motivation),
    ))
}

/// Update an existing motivation
pub async fn update_motivation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateMotivationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let motivation = state
        .motivation_repository
        .update(id, &payload)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update motivation: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or_else(|| ApiError::NotFound(format!("Motivation with ID {id} not found.")))?;

    Ok(Json(motivation))
}

/// Delete a motivation; the store nulls out users that referenced it
pub async fn delete_motivation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state.motivation_repository.delete(id).await.map_err(|e| {
        tracing::error!("Failed to delete motivation: {}", e);
        ApiError::InternalServerError
    })?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!(
            "Motivation with ID {id} not found."
        )))
    }
}
