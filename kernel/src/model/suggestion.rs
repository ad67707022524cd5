use serde::{Deserialize, Serialize};

use crate::model::room::RoomCategory;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestProfile {
    pub name: String,
    pub interests: Vec<String>,
    pub travel_purpose: Option<String>,
    pub party_size: u32,
}

#[derive(Debug, Clone)]
pub struct ActivityRequest {
    pub guest: GuestProfile,
    pub preferences: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecommendations {
    pub recommendations: String,
}

#[derive(Debug, Clone)]
pub struct UpgradeRequest {
    pub guest: GuestProfile,
    pub current_category: RoomCategory,
    pub nights: i64,
    pub guests: u32,
    pub occasion: Option<String>,
    pub budget_per_night: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeSuggestions {
    pub suggestions: Vec<String>,
    pub reasoning: String,
}
