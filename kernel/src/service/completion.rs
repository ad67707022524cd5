use async_trait::async_trait;
use serde_json::Value;
use shared::error::AppResult;

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    /// JSON schema the completion must conform to.
    pub response_schema: Value,
}

#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Returns the raw completion text, expected to be JSON matching the schema.
    async fn complete(&self, request: CompletionRequest) -> AppResult<String>;
}
