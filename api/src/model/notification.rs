use chrono::NaiveDate;
use garde::Validate;
use kernel::model::notification::{ContactMessage, ReservationRequest};
use serde::Deserialize;

use super::is_after;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(email)]
    pub email: String,
    #[garde(skip)]
    pub phone: Option<String>,
    #[garde(skip)]
    pub subject: Option<String>,
    #[garde(length(min = 1))]
    pub message: String,
}

impl From<ContactRequest> for ContactMessage {
    fn from(value: ContactRequest) -> Self {
        let ContactRequest {
            name,
            email,
            phone,
            subject,
            message,
        } = value;
        ContactMessage::new(name, email, phone, subject, message)
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReservationInquiryRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(email)]
    pub email: String,
    #[garde(skip)]
    pub phone: Option<String>,
    #[garde(length(min = 1))]
    pub room_type: String,
    #[garde(skip)]
    pub check_in: NaiveDate,
    #[garde(custom(is_after(&self.check_in)))]
    pub check_out: NaiveDate,
    #[garde(range(min = 1))]
    pub guests: u32,
    #[garde(skip)]
    pub message: Option<String>,
}

impl From<ReservationInquiryRequest> for ReservationRequest {
    fn from(value: ReservationInquiryRequest) -> Self {
        let ReservationInquiryRequest {
            name,
            email,
            phone,
            room_type,
            check_in,
            check_out,
            guests,
            message,
        } = value;
        ReservationRequest::new(
            name, email, phone, room_type, check_in, check_out, guests, message,
        )
    }
}
