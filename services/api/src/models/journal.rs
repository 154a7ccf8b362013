//! Journal models for the API service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request for journal creation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJournalRequest {
    pub user_id: i32,
    pub biohack_id: i32,
    pub notes: Option<String>,
    pub rating: Option<i32>,
    pub date_time: DateTime<Utc>,
}

/// Request for a partial journal update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJournalRequest {
    pub user_id: Option<i32>,
    pub biohack_id: Option<i32>,
    pub notes: Option<String>,
    pub rating: Option<i32>,
    pub date_time: Option<DateTime<Utc>>,
}

/// Response for journal operations, with the user's name and the biohack
/// title flattened in
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalResponse {
    pub id: i32,
    pub user_id: i32,
    pub user_first_name: String,
    pub user_last_name: String,
    pub biohack_id: i32,
    pub biohack_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
    pub date_time: DateTime<Utc>,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn journal_response_omits_absent_rating_and_notes() {
        let journal = JournalResponse {
            id: 7,
            user_id: 1,
            user_first_name: "Ada".to_string(),
            user_last_name: "Lovelace".to_string(),
            biohack_id: 2,
            biohack_name: "Cold showers".to_string(),
            notes: None,
            rating: None,
            date_time: Utc::now(),
            created_date: Utc::now(),
            updated_date: Utc::now(),
        };

        let json = serde_json::to_value(&journal).unwrap();
        assert_eq!(json["userFirstName"], "Ada");
        assert_eq!(json["biohackName"], "Cold showers");
        assert!(json.get("rating").is_none());
        assert!(json.get("notes").is_none());
    }
}
