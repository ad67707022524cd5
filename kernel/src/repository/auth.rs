use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{auth::AccessToken, id::UserId};

/// Session store: opaque access tokens mapped to authenticated uids.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn create_token(&self, uid: &UserId) -> AppResult<AccessToken>;
    async fn fetch_user_id_from_token(&self, token: &AccessToken) -> AppResult<Option<UserId>>;
    async fn delete_token(&self, token: &AccessToken) -> AppResult<()>;
}
