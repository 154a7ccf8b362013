//! User models for the API service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request for user creation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub provider: Option<String>,
    pub external_id: Option<String>,
    pub sub_id: Option<String>,
    pub motivation_id: Option<i32>,
}

/// Request for a partial user update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub provider: Option<String>,
    pub external_id: Option<String>,
    pub sub_id: Option<String>,
    pub motivation_id: Option<i32>,
}

/// Response for user operations, with the linked motivation title flattened in
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motivation_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motivation_name: Option<String>,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

/// Body-based request for linking a user to a motivation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkUserMotivationRequest {
    pub user_id: i32,
    pub motivation_id: i32,
}

/// Body-based request for unlinking a user from their motivation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlinkUserMotivationRequest {
    pub user_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn user_response_uses_camel_case_and_omits_nulls() {
        let user = UserResponse {
            id: 1,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            provider: None,
            external_id: None,
            sub_id: None,
            motivation_id: Some(2),
            motivation_name: Some("Better sleep".to_string()),
            created_date: Utc::now(),
            updated_date: Utc::now(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["motivationId"], 2);
        assert_eq!(json["motivationName"], "Better sleep");
        assert!(json.get("provider").is_none());
        assert!(json.get("externalId").is_none());
        assert!(json.get("subId").is_none());
    }

    #[test]
    fn update_request_accepts_partial_bodies() {
        let patch: UpdateUserRequest =
            serde_json::from_str(r#"{"email":"new@example.com"}"#).unwrap();
        assert_eq!(patch.email.as_deref(), Some("new@example.com"));
        assert!(patch.first_name.is_none());
        assert!(patch.motivation_id.is_none());
    }
}
