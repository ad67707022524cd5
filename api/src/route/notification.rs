use axum::{routing::post, Router};
use registry::AppRegistry;

use crate::handler::notification::{send_contact_message, send_reservation_request};

pub fn build_notification_routers() -> Router<AppRegistry> {
    Router::new()
        .route("/contact", post(send_contact_message))
        .route("/reservation-requests", post(send_reservation_request))
}
