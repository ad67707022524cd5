use axum::{extract::State, Json};
use garde::Validate;
use kernel::model::suggestion::{ActivityRecommendations, UpgradeSuggestions};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::model::suggestion::{ActivityRecommendationRequest, RoomUpgradeRequest};

pub async fn recommend_activities(
    State(registry): State<AppRegistry>,
    Json(req): Json<ActivityRecommendationRequest>,
) -> AppResult<Json<ActivityRecommendations>> {
    req.validate(&())?;

    registry
        .suggestion_service()
        .recommend_activities(req.into())
        .await
        .map(Json)
}

pub async fn suggest_room_upgrades(
    State(registry): State<AppRegistry>,
    Json(req): Json<RoomUpgradeRequest>,
) -> AppResult<Json<UpgradeSuggestions>> {
    req.validate(&())?;

    registry
        .suggestion_service()
        .suggest_room_upgrades(req.into())
        .await
        .map(Json)
}
