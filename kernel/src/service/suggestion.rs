use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::suggestion::{
    ActivityRecommendations, ActivityRequest, UpgradeRequest, UpgradeSuggestions,
};

#[async_trait]
pub trait SuggestionService: Send + Sync {
    async fn recommend_activities(&self, request: ActivityRequest)
        -> AppResult<ActivityRecommendations>;
    async fn suggest_room_upgrades(&self, request: UpgradeRequest) -> AppResult<UpgradeSuggestions>;
}
