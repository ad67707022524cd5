use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{auth::Credentials, id::UserId};

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Creates an authentication identity and returns its uid.
    async fn sign_up(&self, credentials: &Credentials) -> AppResult<UserId>;
    /// Verifies credentials; fails with `InvalidCredentials` on mismatch.
    async fn sign_in(&self, credentials: &Credentials) -> AppResult<UserId>;
}
