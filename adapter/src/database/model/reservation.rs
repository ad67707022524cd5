use chrono::{DateTime, NaiveDate, Utc};
use kernel::model::{
    id::RoomId,
    reservation::{stay_total_price, ReservationStatus},
    room::Room,
};
use serde::Serialize;

// reservations コレクションに保存するドキュメント
// roomName と totalPrice は書き込み時点の客室情報から計算したスナップショット
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDocument {
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

impl ReservationDocument {
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        guest_name: String,
        room: &Room,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guests: u32,
        status: ReservationStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            guest_name,
            room_id: room.id.clone(),
            room_name: room.name.clone(),
            check_in,
            check_out,
            guests,
            total_price: stay_total_price(check_in, check_out, room.price),
            status,
            created_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationStatusPatch {
    pub status: ReservationStatus,
}
