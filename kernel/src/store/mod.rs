//! Document-store abstraction: collections of schemaless documents keyed by
//! opaque ids, atomic multi-document commits and live change notification.

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::broadcast;

mod access;
mod batch;
mod document;
mod error;
pub mod live;
mod path;
mod reporting;

pub use access::{authorize, check, Principal};
pub use batch::{WriteBatch, WriteOp};
pub use document::{to_fields, Document};
pub use error::{Operation, PermissionError, StoreError};
pub use path::{Collection, DocumentPath, Filter, Query, SubscriptionKey};
pub use reporting::ReportingStore;

/// Published after every successful commit, once per written document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub path: DocumentPath,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Absent documents resolve to `Ok(None)`.
    async fn get(
        &self,
        principal: &Principal,
        path: &DocumentPath,
    ) -> Result<Option<Document>, StoreError>;

    /// Matching documents in arrival order.
    async fn list(&self, principal: &Principal, query: &Query)
        -> Result<Vec<Document>, StoreError>;

    /// Applies every write or none of them.
    async fn commit(&self, principal: &Principal, batch: WriteBatch) -> Result<(), StoreError>;

    fn changes(&self) -> broadcast::Receiver<Change>;

    async fn ping(&self) -> bool;

    async fn create(
        &self,
        principal: &Principal,
        path: &DocumentPath,
        data: Map<String, Value>,
    ) -> Result<(), StoreError> {
        let mut batch = WriteBatch::new();
        batch.create(path.clone(), data);
        self.commit(principal, batch).await
    }

    async fn update(
        &self,
        principal: &Principal,
        path: &DocumentPath,
        patch: Map<String, Value>,
    ) -> Result<(), StoreError> {
        let mut batch = WriteBatch::new();
        batch.update(path.clone(), patch);
        self.commit(principal, batch).await
    }

    async fn delete(&self, principal: &Principal, path: &DocumentPath) -> Result<(), StoreError> {
        let mut batch = WriteBatch::new();
        batch.delete(path.clone());
        self.commit(principal, batch).await
    }
}
