//! Journal resource handlers

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};

use crate::{
    error::ApiError,
    models::journal::{CreateJournalRequest, UpdateJournalRequest},
    state::AppState,
    validation,
};

/// Routes for the journals resource
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_journals).post(create_journal))
        .route(
            "/:id",
            get(get_journal).put(update_journal).delete(delete_journal),
        )
        .route(
            "/user/:user_id/biohack/:biohack_id",
            get(get_journals_by_user_and_biohack),
        )
}

/// Get all journals
pub async fn get_journals(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let journals = state.journal_repository.get_all().await.map_err(|e| {
        tracing::error!("Failed to get journals: {}", e);
        ApiError::InternalServerError
    })?;

    Ok(Json(journals))
}

/// Get a journal by ID
pub async fn get_journal(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let journal = state
        .journal_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get journal: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or_else(|| ApiError::NotFound(format!("Journal with ID {id} not found.")))?;

    Ok(Json(journal))
}

/// Get all journals for a user and biohack pair, most recent event first
pub async fn get_journals_by_user_and_biohack(
    State(state): State<AppState>,
    Path((user_id, biohack_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, ApiError> {
    let user_exists = state.user_repository.exists(user_id).await.map_err(|e| {
        tracing::error!("Failed to check user existence: {}", e);
        ApiError::InternalServerError
    })?;

    if !user_exists {
        return Err(ApiError::NotFound(format!(
            "User with ID {user_id} not found."
        )));
    }

    let biohack_exists = state
        .biohack_repository
        .exists(biohack_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check biohack existence: {}", e);
            ApiError::InternalServerError
        })?;

    if !biohack_exists {
        return Err(ApiError::NotFound(format!(
            "Biohack with ID {biohack_id} not found."
        )));
    }

    let journals = state
        .journal_repository
        .by_user_and_biohack(user_id, biohack_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get journals for user and biohack: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(journals))
}

/// Create a new journal entry
pub async fn create_journal(
    State(state): State<AppState>,
    Json(payload): Json<CreateJournalRequest>,
) -> Result<impl IntoResponse, ApiError> {
    ensure_user_exists(&state, Some(payload.user_id)).await?;
    ensure_biohack_exists(&state, Some(payload.biohack_id)).await?;
    validation::validate_rating(payload.rating).map_err(ApiError::BadRequest)?;

    let journal = state.journal_repository.create(&payload).await.map_err(|e| {
        tracing::error!("Failed to create journal: {}", e);
        ApiError::InternalServerError
    })?;

    let location = format!("/api/journals/{}", journal.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(journal),
    ))
}

/// Update an existing journal entry
pub async fn update_journal(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateJournalRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // A missing target id is reported before any check on the patch fields
    let journal_exists = state.journal_repository.exists(id).await.map_err(|e| {
        tracing::error!("Failed to check journal existence: {}", e);
        ApiError::InternalServerError
    })?;

    if !journal_exists {
        return Err(ApiError::NotFound(format!("Journal with ID {id} not found.")));
    }

    ensure_user_exists(&state, payload.user_id).await?;
    ensure_biohack_exists(&state, payload.biohack_id).await?;
    validation::validate_rating(payload.rating).map_err(ApiError::BadRequest)?;

    let journal = state
        .journal_repository
        .update(id, &payload)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update journal: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or_else(|| ApiError::NotFound(format!("Journal with ID {id} not found.")))?;

    Ok(Json(journal))
}

/// Delete a journal entry
pub async fn delete_journal(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state.journal_repository.delete(id).await.map_err(|e| {
        tracing::error!("Failed to delete journal: {}", e);
        ApiError::InternalServerError
    })?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Journal with ID {id} not found.")))
    }
}

async fn ensure_user_exists(state: &AppState, user_id: Option<i32>) -> Result<(), ApiError> {
    let Some(user_id) = user_id else {
        return Ok(());
    };

    let exists = state.user_repository.exists(user_id).await.map_err(|e| {
        tracing::error!("Failed to check user existence: {}", e);
        ApiError::InternalServerError
    })?;

    if exists {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!(
            "User with ID {user_id} does not exist."
        )))
    }
}

async fn ensure_biohack_exists(state: &AppState, biohack_id: Option<i32>) -> Result<(), ApiError> {
    let Some(biohack_id) = biohack_id else {
        return Ok(());
    };

    let exists = state
        .biohack_repository
        .exists(biohack_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check biohack existence: {}", e);
            ApiError::InternalServerError
        })?;

    if exists {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!(
            "Biohack with ID {biohack_id} does not exist."
        )))
    }
}
