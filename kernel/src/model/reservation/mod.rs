use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::model::{
    id::{ReservationId, RoomId},
    room::RoomStatus,
};

pub mod event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum ReservationStatus {
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl ReservationStatus {
    /// Whether a reservation in this status keeps its room `Occupied`.
    pub fn holds_room(self) -> bool {
        matches!(
            self,
            ReservationStatus::Confirmed | ReservationStatus::InProgress
        )
    }

    /// Room status to restore when a reservation leaves a holding status.
    pub fn released_room_status(self) -> RoomStatus {
        match self {
            ReservationStatus::Completed => RoomStatus::Cleaning,
            _ => RoomStatus::Available,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
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

/// Number of billed nights; same-day stays are billed as one night.
pub fn stay_nights(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days().max(1)
}

pub fn stay_total_price(check_in: NaiveDate, check_out: NaiveDate, nightly_price: f64) -> f64 {
    stay_nights(check_in, check_out) as f64 * nightly_price
}
