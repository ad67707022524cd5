use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::notification::MailMessage;

#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, message: MailMessage) -> AppResult<()>;
}
