use serde::Serialize;
use serde_json::Value;
use shared::error::AppError;
use strum::{AsRefStr, Display};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Operation {
    Get,
    List,
    Create,
    Update,
    Delete,
}

/// Access-rule rejection of a single store request.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{operation} on /{path} was denied by access rules")]
pub struct PermissionError {
    pub path: String,
    pub operation: Operation,
    pub request_resource_data: Option<Value>,
}

impl PermissionError {
    pub fn new(path: impl Into<String>, operation: Operation, data: Option<Value>) -> Self {
        Self {
            path: path.into(),
            operation,
            request_resource_data: data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error(transparent)]
    PermissionDenied(PermissionError),
    #[error("document {0} already exists")]
    AlreadyExists(String),
    #[error("document {0} does not exist")]
    NotFound(String),
    #[error("document {0} was changed by a concurrent write")]
    Conflict(String),
    #[error("{0}")]
    Backend(String),
    #[error("malformed document {0}")]
    Decode(String),
}

impl StoreError {
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, StoreError::PermissionDenied(_))
    }
}

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::PermissionDenied(e) => AppError::PermissionDenied(e.to_string()),
            StoreError::AlreadyExists(path) => {
                AppError::UnprocessableEntity(format!("{path} already exists"))
            }
            StoreError::NotFound(path) => AppError::EntityNotFound(format!("{path} not found")),
            StoreError::Conflict(path) => {
                AppError::UnprocessableEntity(format!("{path} was changed concurrently"))
            }
            StoreError::Backend(message) => AppError::DocumentStoreError(message),
            StoreError::Decode(message) => AppError::ConversionEntityError(message),
        }
    }
}
