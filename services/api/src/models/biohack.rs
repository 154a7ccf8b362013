//! Biohack models and the static category table

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of biohack categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BiohackCategory {
    Sleep,
    Nutrition,
    Exercise,
    CognitiveEnhancement,
    StressManagement,
    ColdExposure,
    Breathwork,
    Supplementation,
    Recovery,
    Longevity,
}

/// All categories, in listing order
pub const CATEGORIES: [BiohackCategory; 10] = [
    BiohackCategory::Sleep,
    BiohackCategory::Nutrition,
    BiohackCategory::Exercise,
    BiohackCategory::CognitiveEnhancement,
    BiohackCategory::StressManagement,
    BiohackCategory::ColdExposure,
    BiohackCategory::Breathwork,
    BiohackCategory::Supplementation,
    BiohackCategory::Recovery,
    BiohackCategory::Longevity,
];

impl BiohackCategory {
    /// Wire and storage value for the category
    pub fn as_str(&self) -> &'static str {
        match self {
            BiohackCategory::Sleep => "Sleep",
            BiohackCategory::Nutrition => "Nutrition",
            BiohackCategory::Exercise => "Exercise",
            BiohackCategory::CognitiveEnhancement => "CognitiveEnhancement",
            BiohackCategory::StressManagement => "StressManagement",
            BiohackCategory::ColdExposure => "ColdExposure",
            BiohackCategory::Breathwork => "Breathwork",
            BiohackCategory::Supplementation => "Supplementation",
            BiohackCategory::Recovery => "Recovery",
            BiohackCategory::Longevity => "Longevity",
        }
    }

    /// Human-readable display label for the category
    pub fn label(&self) -> &'static str {
        match self {
            BiohackCategory::Sleep => "Sleep",
            BiohackCategory::Nutrition => "Nutrition",
            BiohackCategory::Exercise => "Exercise",
            BiohackCategory::CognitiveEnhancement => "Cognitive Enhancement",
            BiohackCategory::StressManagement => "Stress Management",
            BiohackCategory::ColdExposure => "Cold Exposure",
            BiohackCategory::Breathwork => "Breathwork",
            BiohackCategory::Supplementation => "Supplementation",
            BiohackCategory::Recovery => "Recovery",
            BiohackCategory::Longevity => "Longevity",
        }
    }
}

impl fmt::Display for BiohackCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BiohackCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CATEGORIES
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown biohack category: {s}"))
    }
}

/// Request for biohack creation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBiohackRequest {
    pub title: String,
    pub technique: Option<String>,
    pub category: BiohackCategory,
    pub difficulty: Option<String>,
    pub time_required: Option<String>,
    #[serde(default)]
    pub action: Vec<String>,
    pub mechanism: Option<String>,
    pub research_studies: Option<String>,
    pub biology: Option<String>,
    pub color_gradient: Option<String>,
}

/// Request for a partial biohack update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBiohackRequest {
    pub title: Option<String>,
    pub technique: Option<String>,
    pub category: Option<BiohackCategory>,
    pub difficulty: Option<String>,
    pub time_required: Option<String>,
    pub action: Option<Vec<String>>,
    pub mechanism: Option<String>,
    pub research_studies: Option<String>,
    pub biology: Option<String>,
    pub color_gradient: Option<String>,
}

/// Response for biohack operations
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BiohackResponse {
    pub id: i32,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technique: Option<String>,
    pub category: BiohackCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_required: Option<String>,
    pub action: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mechanism: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub research_studies: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biology: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_gradient: Option<String>,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

/// Body for the multi-field filter endpoint; every field is optional and
/// supplied fields are combined with logical AND
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiohackFilterRequest {
    pub category: Option<BiohackCategory>,
    pub technique: Option<String>,
    pub difficulty: Option<String>,
    pub time_required: Option<String>,
    pub search_term: Option<String>,
}

/// One entry of the static category listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub value: &'static str,
    pub label: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_table_has_ten_entries() {
        assert_eq!(CATEGORIES.len(), 10);
    }

    #[test]
    fn category_round_trips_through_wire_name() {
        for category in CATEGORIES {
            let parsed: BiohackCategory = category.as_str().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!("Gardening".parse::<BiohackCategory>().is_err());
    }

    #[test]
    fn category_serializes_as_pascal_case_variant() {
        let json = serde_json::to_string(&BiohackCategory::CognitiveEnhancement).unwrap();
        assert_eq!(json, r#""CognitiveEnhancement""#);
    }

    #[test]
    fn multi_word_categories_have_spaced_labels() {
        assert_eq!(BiohackCategory::CognitiveEnhancement.label(), "Cognitive Enhancement");
        assert_eq!(BiohackCategory::ColdExposure.label(), "Cold Exposure");
        assert_eq!(BiohackCategory::Sleep.label(), "Sleep");
    }

    #[test]
    fn filter_request_accepts_empty_body() {
        let filter: BiohackFilterRequest = serde_json::from_str("{}").unwrap();
        assert!(filter.category.is_none());
        assert!(filter.search_term.is_none());
    }

    #[test]
    fn create_request_defaults_action_to_empty() {
        let req: CreateBiohackRequest =
            serde_json::from_str(r#"{"title":"Morning light","category":"Sleep"}"#).unwrap();
        assert!(req.action.is_empty());
        assert_eq!(req.category, BiohackCategory::Sleep);
    }
}
