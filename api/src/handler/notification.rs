use axum::{extract::State, http::StatusCode, Json};
use garde::Validate;
use kernel::model::notification::{ContactMessage, MailMessage, ReservationRequest};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::model::notification::{ContactRequest, ReservationInquiryRequest};

pub async fn send_contact_message(
    State(registry): State<AppRegistry>,
    Json(req): Json<ContactRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    let message = ContactMessage::from(req);
    registry
        .mail_sender()
        .send(MailMessage::from(&message))
        .await
        .map(|_| StatusCode::ACCEPTED)
}

pub async fn send_reservation_request(
    State(registry): State<AppRegistry>,
    Json(req): Json<ReservationInquiryRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    let request = ReservationRequest::from(req);
    registry
        .mail_sender()
        .send(MailMessage::from(&request))
        .await
        .map(|_| StatusCode::ACCEPTED)
}
