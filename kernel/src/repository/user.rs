use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::UserId,
    user::{
        event::{CreateUserProfile, DeleteUserProfile, UpdateUserRole},
        UserProfile,
    },
};
use crate::store::Principal;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, principal: &Principal, event: CreateUserProfile) -> AppResult<()>;
    async fn find_by_id(&self, principal: &Principal, uid: &UserId)
        -> AppResult<Option<UserProfile>>;
    async fn find_all(&self, principal: &Principal) -> AppResult<Vec<UserProfile>>;
    async fn update_role(&self, principal: &Principal, event: UpdateUserRole) -> AppResult<()>;
    // プロフィールのみ削除する。認証プロバイダ側の ID は残る
    async fn delete(&self, principal: &Principal, event: DeleteUserProfile) -> AppResult<()>;
}
