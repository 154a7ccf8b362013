//! Biohack resource handlers

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};

use crate::{
    error::ApiError,
    models::biohack::{
        BiohackCategory, BiohackFilterRequest, CATEGORIES, CategoryResponse,
        CreateBiohackRequest, UpdateBiohackRequest,
    },
    state::AppState,
    validation,
};

/// Routes for the biohacks resource
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_biohacks).post(create_biohack))
        .route(
            "/:id",
            get(get_biohack).put(update_biohack).delete(delete_biohack),
        )
        .route("/filter", post(filter_biohacks))
        .route("/category/:category", get(get_biohacks_by_category))
        .route("/technique/:technique", get(get_biohacks_by_technique))
        .route("/categories", get(get_categories))
}

/// Get all biohacks
pub async fn get_biohacks(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let biohacks = state.biohack_repository.get_all().await.map_err(|e| {
        tracing::error!("Failed to get biohacks: {}", e);
        ApiError::InternalServerError
    })?;

    Ok(Json(biohacks))
}

/// Get a biohack by ID
pub async fn get_biohack(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let biohack = state
        .biohack_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get biohack: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or_else(|| ApiError::NotFound(format!("Biohack with ID {id} not found.")))?;

    Ok(Json(biohack))
}

/// Create a new biohack
pub async fn create_biohack(
    State(state): State<AppState>,
    Json(payload): Json<CreateBiohackRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validation::validate_title(&payload.title).map_err(ApiError::BadRequest)?;

    let biohack = state.biohack_repository.create(&payload).await.map_err(|e| {
        tracing::error!("Failed to create biohack: {}", e);
        ApiError::InternalServerError
    })?;

    let location = format!("/api/biohacks/{}", biohack.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(biohack),
    ))
}

/// Update an existing biohack
pub async fn update_biohack(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateBiohackRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(title) = &payload.title {
        validation::validate_title(title).map_err(ApiError::BadRequest)?;
    }

    let biohack = state
        .biohack_repository
        .update(id, &payload)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update biohack: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or_else(|| ApiError::NotFound(format!("Biohack with ID {id} not found.")))?;

    Ok(Json(biohack))
}

/// Delete a biohack; the store cascades its journals and motivation links
pub async fn delete_biohack(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state.biohack_repository.delete(id).await.map_err(|e| {
        tracing::error!("Failed to delete biohack: {}", e);
        ApiError::InternalServerError
    })?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Biohack with ID {id} not found.")))
    }
}

/// Multi-field filter over biohacks; supplied fields are AND-combined
pub async fn filter_biohacks(
    State(state): State<AppState>,
    Json(payload): Json<BiohackFilterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let biohacks = state.biohack_repository.filter(&payload).await.map_err(|e| {
        tracing::error!("Failed to filter biohacks: {}", e);
        ApiError::InternalServerError
    })?;

    Ok(Json(biohacks))
}

/// Get all biohacks in a category; the path value must be one of the ten
/// known category names
pub async fn get_biohacks_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let category: BiohackCategory = category.parse().map_err(ApiError::BadRequest)?;

    let biohacks = state
        .biohack_repository
        .by_category(category)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get biohacks by category: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(biohacks))
}

/// Get all biohacks whose technique contains the given text
pub async fn get_biohacks_by_technique(
    State(state): State<AppState>,
    Path(technique): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let biohacks = state
        .biohack_repository
        .by_technique(&technique)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get biohacks by technique: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(biohacks))
}

/// List the static category table with display labels
pub async fn get_categories() -> impl IntoResponse {
    let categories: Vec<CategoryResponse> = CATEGORIES
        .into_iter()
        .map(|category| CategoryResponse {
            value: category.as_str(),
            label: category.label(),
        })
        .collect();

    Json(categories)
}
