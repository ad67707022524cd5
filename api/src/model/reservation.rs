use chrono::{DateTime, NaiveDate, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::{ReservationId, RoomId},
    reservation::{
        event::{CreateReservation, UpdateReservation, UpdateReservationStatus},
        Reservation, ReservationStatus,
    },
};
use serde::{Deserialize, Serialize};

use super::is_after;

fn default_status() -> ReservationStatus {
    ReservationStatus::Confirmed
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    #[garde(length(min = 1))]
    pub guest_name: String,
    #[garde(length(min = 1))]
    pub room_id: String,
    #[garde(skip)]
    pub check_in: NaiveDate,
    #[garde(custom(is_after(&self.check_in)))]
    pub check_out: NaiveDate,
    #[garde(range(min = 1))]
    pub guests: u32,
    #[garde(skip)]
    #[serde(default = "default_status")]
    pub status: ReservationStatus,
}

impl From<CreateReservationRequest> for CreateReservation {
    fn from(value: CreateReservationRequest) -> Self {
        let CreateReservationRequest {
            guest_name,
            room_id,
            check_in,
            check_out,
            guests,
            status,
        } = value;
        CreateReservation::new(
            guest_name,
            RoomId::from(room_id),
            check_in,
            check_out,
            guests,
            status,
        )
    }
}

// 更新時も作成時と同じ項目をすべて受け取る
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservationRequest {
    #[garde(length(min = 1))]
    pub guest_name: String,
    #[garde(length(min = 1))]
    pub room_id: String,
    #[garde(skip)]
    pub check_in: NaiveDate,
    #[garde(custom(is_after(&self.check_in)))]
    pub check_out: NaiveDate,
    #[garde(range(min = 1))]
    pub guests: u32,
    #[garde(skip)]
    pub status: ReservationStatus,
}

#[derive(new)]
pub struct UpdateReservationRequestWithId(ReservationId, UpdateReservationRequest);

impl From<UpdateReservationRequestWithId> for UpdateReservation {
    fn from(value: UpdateReservationRequestWithId) -> Self {
        let UpdateReservationRequestWithId(
            reservation_id,
            UpdateReservationRequest {
                guest_name,
                room_id,
                check_in,
                check_out,
                guests,
                status,
            },
        ) = value;
        UpdateReservation::new(
            reservation_id,
            guest_name,
            RoomId::from(room_id),
            check_in,
            check_out,
            guests,
            status,
        )
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservationStatusRequest {
    #[garde(skip)]
    pub status: ReservationStatus,
}

#[derive(new)]
pub struct UpdateReservationStatusRequestWithId(ReservationId, UpdateReservationStatusRequest);

impl From<UpdateReservationStatusRequestWithId> for UpdateReservationStatus {
    fn from(value: UpdateReservationStatusRequestWithId) -> Self {
        let UpdateReservationStatusRequestWithId(
            reservation_id,
            UpdateReservationStatusRequest { status },
        ) = value;
        UpdateReservationStatus::new(reservation_id, status)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub id: ReservationId,
    pub guest_name: String,
    pub room_id: RoomId,
    pub room_name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    pub total_price: f64,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationResponse {
    fn from(value: Reservation) -> Self {
        let Reservation {
            id,
            guest_name,
            room_id,
            room_name,
            check_in,
            check_out,
            guests,
            total_price,
            status,
            created_at,
        } = value;
        Self {
            id,
            guest_name,
            room_id,
            room_name,
            check_in,
            check_out,
            guests,
            total_price,
            status,
            created_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationsResponse {
    pub items: Vec<ReservationResponse>,
}

impl From<Vec<Reservation>> for ReservationsResponse {
    fn from(value: Vec<Reservation>) -> Self {
        Self {
            items: value.into_iter().map(ReservationResponse::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationListQuery {
    pub room_id: Option<RoomId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(check_in: &str, check_out: &str) -> CreateReservationRequest {
        serde_json::from_value(json!({
            "guestName": "Awa Diop",
            "roomId": "room-1",
            "checkIn": check_in,
            "checkOut": check_out,
            "guests": 2
        }))
        .unwrap()
    }

    #[test]
    fn check_out_must_follow_check_in() {
        assert!(request("2025-06-01", "2025-06-04").validate(&()).is_ok());
        assert!(request("2025-06-04", "2025-06-04").validate(&()).is_err());
        assert!(request("2025-06-04", "2025-06-01").validate(&()).is_err());
    }

    #[test]
    fn new_reservations_default_to_confirmed() {
        let event = CreateReservation::from(request("2025-06-01", "2025-06-04"));
        assert_eq!(event.status, ReservationStatus::Confirmed);
        assert_eq!(event.room_id, RoomId::from("room-1"));
    }
}
