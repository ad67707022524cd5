use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::env::{which, Environment};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    ValidationError(#[from] garde::Report),
    #[error("{0}")]
    RoomUnavailable(String),
    #[error("Missing or insufficient permissions: {0}")]
    PermissionDenied(String),
    #[error("トランザクションを実行できませんでした。")]
    TransactionError(#[source] sqlx::Error),
    #[error("{0}")]
    KeyValueStoreError(#[from] redis::RedisError),
    #[error("document store failure: {0}")]
    DocumentStoreError(String),
    #[error("{0}")]
    ConversionEntityError(String),
    #[error("external service failure: {0}")]
    ExternalServiceError(String),
    #[error("missing required configuration: {0}")]
    MissingConfiguration(String),
    #[error("ログインが必要です。")]
    UnauthenticatedError,
    #[error("メールアドレスかパスワードが正しくありません。")]
    InvalidCredentials,
    #[error("許可されていない操作です。")]
    ForbiddenOperation,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::RoomUnavailable(_) => StatusCode::CONFLICT,
            AppError::PermissionDenied(_) | AppError::ForbiddenOperation => StatusCode::FORBIDDEN,
            AppError::UnauthenticatedError | AppError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            e @ (AppError::TransactionError(_)
            | AppError::KeyValueStoreError(_)
            | AppError::DocumentStoreError(_)
            | AppError::ConversionEntityError(_)
            | AppError::ExternalServiceError(_)
            | AppError::MissingConfiguration(_)) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Unexpected error happened"
                );
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    // 本番環境では内部の詳細を返さない
    fn public_message(&self, status: StatusCode) -> String {
        match which() {
            Environment::Development => self.to_string(),
            Environment::Production => match self {
                AppError::PermissionDenied(_) => {
                    "You do not have permission to perform this action.".into()
                }
                _ if status.is_server_error() => {
                    "Something went wrong. Please try again later.".into()
                }
                _ => self.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let message = self.public_message(status_code);
        (status_code, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
