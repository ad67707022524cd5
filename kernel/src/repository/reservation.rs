use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::{ReservationId, RoomId},
    reservation::{
        event::{CreateReservation, DeleteReservation, UpdateReservation, UpdateReservationStatus},
        Reservation,
    },
};
use crate::store::Principal;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    // 予約の作成と客室の Occupied 化を一括で行う
    async fn create(&self, principal: &Principal, event: CreateReservation)
        -> AppResult<ReservationId>;
    // 予約内容の更新。客室の付け替えがあれば旧客室を解放する
    async fn update(&self, principal: &Principal, event: UpdateReservation) -> AppResult<()>;
    // ステータス変更。終了・キャンセル時は客室を解放する
    async fn update_status(
        &self,
        principal: &Principal,
        event: UpdateReservationStatus,
    ) -> AppResult<()>;
    async fn delete(&self, principal: &Principal, event: DeleteReservation) -> AppResult<()>;
    async fn find_all(&self, principal: &Principal) -> AppResult<Vec<Reservation>>;
    async fn find_by_id(
        &self,
        principal: &Principal,
        reservation_id: &ReservationId,
    ) -> AppResult<Option<Reservation>>;
    async fn find_by_room_id(
        &self,
        principal: &Principal,
        room_id: &RoomId,
    ) -> AppResult<Vec<Reservation>>;
}
