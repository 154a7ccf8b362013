//! Motivation-biohack relationship models

use serde::{Deserialize, Serialize};

/// Request identifying a motivation-biohack pair; used for create and for
/// the link/unlink convenience endpoints
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMotivationBiohackRequest {
    pub motivation_id: i32,
    pub biohack_id: i32,
}

/// Response for a motivation-biohack relationship, with both display titles
/// flattened in
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MotivationBiohackResponse {
    pub motivation_id: i32,
    pub motivation_name: String,
    pub biohack_id: i32,
    pub biohack_name: String,
}
