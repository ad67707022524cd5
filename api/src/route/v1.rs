use super::{
    amenity::build_amenity_routers, auth::build_auth_routers, health::build_health_check_routers,
    live::build_live_routers, notification::build_notification_routers,
    reservation::build_reservation_routers, room::build_room_routers,
    suggestion::build_suggestion_routers, user::build_user_router,
};
use axum::Router;
use registry::AppRegistry;

pub fn routes() -> Router<AppRegistry> {
    let router = Router::new()
        .merge(build_health_check_routers())
        .merge(build_auth_routers())
        .merge(build_room_routers())
        .merge(build_amenity_routers())
        .merge(build_reservation_routers())
        .merge(build_user_router())
        .merge(build_notification_routers())
        .merge(build_suggestion_routers())
        .merge(build_live_routers());
    Router::new().nest("/api/v1", router)
}
