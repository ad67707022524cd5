use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::live::{live_reservations, live_room, live_rooms};

pub fn build_live_routers() -> Router<AppRegistry> {
    let live_routers = Router::new()
        .route("/rooms", get(live_rooms))
        .route("/rooms/:room_id", get(live_room))
        .route("/reservations", get(live_reservations));

    Router::new().nest("/live", live_routers)
}
