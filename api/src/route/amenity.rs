use axum::{
    routing::{delete, get, post, put},
    Extension, Router,
};
use kernel::model::amenity::AmenityKind;
use registry::AppRegistry;

use crate::handler::amenity::{
    delete_amenity, register_amenity, show_amenity, show_amenity_list, update_amenity,
};

fn amenity_routers(kind: AmenityKind) -> Router<AppRegistry> {
    Router::new()
        .route("/", post(register_amenity))
        .route("/", get(show_amenity_list))
        .route("/:amenity_id", get(show_amenity))
        .route("/:amenity_id", put(update_amenity))
        .route("/:amenity_id", delete(delete_amenity))
        .layer(Extension(kind))
}

pub fn build_amenity_routers() -> Router<AppRegistry> {
    Router::new()
        .nest("/pools", amenity_routers(AmenityKind::Pool))
        .nest("/dining", amenity_routers(AmenityKind::Dining))
        .nest("/meeting-rooms", amenity_routers(AmenityKind::MeetingRoom))
}
