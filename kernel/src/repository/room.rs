use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::RoomId,
    room::{
        event::{CreateRoom, DeleteRoom, UpdateRoom},
        Room,
    },
};
use crate::store::Principal;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn create(&self, principal: &Principal, event: CreateRoom) -> AppResult<RoomId>;
    async fn find_all(&self, principal: &Principal) -> AppResult<Vec<Room>>;
    // 予約可能（Available）な客室のみを取得する
    async fn find_available(&self, principal: &Principal) -> AppResult<Vec<Room>>;
    async fn find_by_id(&self, principal: &Principal, room_id: &RoomId) -> AppResult<Option<Room>>;
    async fn update(&self, principal: &Principal, event: UpdateRoom) -> AppResult<()>;
    async fn delete(&self, principal: &Principal, event: DeleteRoom) -> AppResult<()>;
}
