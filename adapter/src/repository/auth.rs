use std::sync::Arc;

use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{auth::AccessToken, id::UserId},
    repository::auth::AuthRepository,
};
use shared::error::AppResult;
use uuid::Uuid;

use crate::redis::RedisClient;

#[derive(new)]
pub struct AuthRepositoryImpl {
    kv: Arc<RedisClient>,
    ttl: u64,
}

fn session_key(token: &AccessToken) -> String {
    format!("session:{}", token.as_str())
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn create_token(&self, uid: &UserId) -> AppResult<AccessToken> {
        let token = AccessToken::new(Uuid::new_v4().simple().to_string());
        self.kv
            .set_ex(&session_key(&token), uid.as_str(), self.ttl)
            .await?;
        Ok(token)
    }

    async fn fetch_user_id_from_token(&self, token: &AccessToken) -> AppResult<Option<UserId>> {
        Ok(self.kv.get(&session_key(token)).await?.map(UserId::from))
    }

    async fn delete_token(&self, token: &AccessToken) -> AppResult<()> {
        self.kv.delete(&session_key(token)).await
    }
}
