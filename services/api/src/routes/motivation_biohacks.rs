//! Motivation-biohack relationship handlers

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};

use crate::{
    error::{ApiError, is_unique_violation},
    models::motivation_biohack::CreateMotivationBiohackRequest,
    state::AppState,
};

/// Routes for the motivation-biohack relationship resource
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_links).post(create_link))
        .route(
            "/:motivation_id/:biohack_id",
            get(get_link).delete(delete_link),
        )
        .route("/link", post(link))
        .route("/unlink", post(unlink))
}

/// Get all motivation-biohack relationships
pub async fn get_links(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let links = state
        .motivation_biohack_repository
        .get_all()
        .await
        .map_err(|e| {
            tracing::error!("Failed to get motivation-biohack relationships: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(links))
}

/// Get a motivation-biohack relationship by its composite key
pub async fn get_link(
    State(state): State<AppState>,
    Path((motivation_id, biohack_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, ApiError> {
    let link = state
        .motivation_biohack_repository
        .find_by_id(motivation_id, biohack_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get motivation-biohack relationship: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or_else(|| not_found_message(motivation_id, biohack_id))?;

    Ok(Json(link))
}

/// Create a motivation-biohack relationship
pub async fn create_link(
    State(state): State<AppState>,
    Json(payload): Json<CreateMotivationBiohackRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let motivation_exists = state
        .motivation_repository
        .exists(payload.motivation_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check motivation existence: {}", e);
            ApiError::InternalServerError
        })?;

    if !motivation_exists {
        return Err(ApiError::BadRequest(format!(
            "Motivation with ID {} does not exist.",
            payload.motivation_id
        )));
    }

    let biohack_exists = state
        .biohack_repository
        .exists(payload.biohack_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check biohack existence: {}", e);
            ApiError::InternalServerError
        })?;

    if !biohack_exists {
        return Err(ApiError::BadRequest(format!(
            "Biohack with ID {} does not exist.",
            payload.biohack_id
        )));
    }

    let pair_exists = state
        .motivation_biohack_repository
        .exists(payload.motivation_id, payload.biohack_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check relationship existence: {}", e);
            ApiError::InternalServerError
        })?;

    if pair_exists {
        return Err(duplicate_message(payload.motivation_id, payload.biohack_id));
    }

    let link = state
        .motivation_biohack_repository
        .create(&payload)
        .await
        .map_err(|e| {
            // The pre-check and the insert are not atomic; a lost race hits
            // the composite primary key and still maps to 409.
            if is_unique_violation(&e) {
                duplicate_message(payload.motivation_id, payload.biohack_id)
            } else {
                tracing::error!("Failed to create motivation-biohack relationship: {}", e);
                ApiError::InternalServerError
            }
        })?;

    let location = format!(
        "/api/motivationbiohacks/{}/{}",
        link.motivation_id, link.biohack_id
    );
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(link),
    ))
}

/// Delete a motivation-biohack relationship by its composite key
pub async fn delete_link(
    State(state): State<AppState>,
    Path((motivation_id, biohack_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state
        .motivation_biohack_repository
        .delete(motivation_id, biohack_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete motivation-biohack relationship: {}", e);
            ApiError::InternalServerError
        })?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found_message(motivation_id, biohack_id))
    }
}

/// Link a motivation to a biohack; alternate request shape for create
pub async fn link(
    state: State<AppState>,
    payload: Json<CreateMotivationBiohackRequest>,
) -> Result<impl IntoResponse, ApiError> {
    create_link(state, payload).await
}

/// Unlink a motivation from a biohack; alternate request shape for delete
pub async fn unlink(
    state: State<AppState>,
    Json(payload): Json<CreateMotivationBiohackRequest>,
) -> Result<impl IntoResponse, ApiError> {
    delete_link(state, Path((payload.motivation_id, payload.biohack_id))).await
}

fn not_found_message(motivation_id: i32, biohack_id: i32) -> ApiError {
    ApiError::NotFound(format!(
        "Motivation-biohack relationship with Motivation ID {motivation_id} \
         and Biohack ID {biohack_id} not found."
    ))
}

fn duplicate_message(motivation_id: i32, biohack_id: i32) -> ApiError {
    ApiError::Conflict(format!(
        "Relationship between Motivation ID {motivation_id} \
         and Biohack ID {biohack_id} already exists."
    ))
}
