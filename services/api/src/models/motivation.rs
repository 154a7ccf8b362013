//! Motivation models for the API service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request for motivation creation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMotivationRequest {
    pub title: String,
    pub description: Option<String>,
}

/// Request for a partial motivation update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMotivationRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Response for motivation operations
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MotivationResponse {
    pub id: i32,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}
