//! API service routes

use axum::{Json, Router, response::IntoResponse, routing::get};
use serde_json::json;

use crate::state::AppState;

pub mod biohacks;
pub mod journals;
pub mod motivation_biohacks;
pub mod motivations;
pub mod users;

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/users", users::router())
        .nest("/api/motivations", motivations::router())
        .nest("/api/biohacks", biohacks::router())
        .nest("/api/journals", journals::router())
        .nest("/api/motivationbiohacks", motivation_biohacks::router())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "biohacking-api"
    }))
}
