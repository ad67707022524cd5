use chrono::NaiveDate;
use derive_new::new;

use crate::model::{
    id::{ReservationId, RoomId},
    reservation::ReservationStatus,
};

#[derive(new, Debug)]
pub struct CreateReservation {
    pub guest_name: String,
    pub room_id: RoomId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    pub status: ReservationStatus,
}

#[derive(new, Debug)]
pub struct UpdateReservation {
    pub reservation_id: ReservationId,
    pub guest_name: String,
    pub room_id: RoomId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    pub status: ReservationStatus,
}

#[derive(new, Debug)]
pub struct UpdateReservationStatus {
    pub reservation_id: ReservationId,
    pub status: ReservationStatus,
}

#[derive(new, Debug)]
pub struct DeleteReservation {
    pub reservation_id: ReservationId,
}
