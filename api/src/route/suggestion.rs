use axum::{routing::post, Router};
use registry::AppRegistry;

use crate::handler::suggestion::{recommend_activities, suggest_room_upgrades};

pub fn build_suggestion_routers() -> Router<AppRegistry> {
    let ai_routers = Router::new()
        .route("/activities", post(recommend_activities))
        .route("/room-upgrades", post(suggest_room_upgrades));

    Router::new().nest("/ai", ai_routers)
}
