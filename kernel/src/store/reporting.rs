use std::sync::Arc;

use serde_json::{Map, Value};

use crate::channel::{ErrorChannel, ErrorEvent};
use crate::store::{
    Document, DocumentPath, DocumentStore, Operation, PermissionError, Principal, Query,
    StoreError, WriteBatch,
};

/// Store handle used by the application: every access-rule rejection is
/// published on the error channel exactly once, then returned to the caller.
#[derive(Clone)]
pub struct ReportingStore {
    store: Arc<dyn DocumentStore>,
    channel: ErrorChannel,
}

impl ReportingStore {
    pub fn new(store: Arc<dyn DocumentStore>, channel: ErrorChannel) -> Self {
        Self { store, channel }
    }

    pub fn inner(&self) -> Arc<dyn DocumentStore> {
        self.store.clone()
    }

    pub fn channel(&self) -> &ErrorChannel {
        &self.channel
    }

    pub async fn get(
        &self,
        principal: &Principal,
        path: &DocumentPath,
    ) -> Result<Option<Document>, StoreError> {
        self.store
            .get(principal, path)
            .await
            .inspect_err(|e| self.report(e, path.to_string(), Operation::Get, None))
    }

    pub async fn list(
        &self,
        principal: &Principal,
        query: &Query,
    ) -> Result<Vec<Document>, StoreError> {
        self.store
            .list(principal, query)
            .await
            .inspect_err(|e| self.report(e, query.target().to_string(), Operation::List, None))
    }

    pub async fn create(
        &self,
        principal: &Principal,
        path: &DocumentPath,
        data: Map<String, Value>,
    ) -> Result<(), StoreError> {
        let attempted = Value::Object(data.clone());
        self.store
            .create(principal, path, data)
            .await
            .inspect_err(|e| {
                self.report(e, path.to_string(), Operation::Create, Some(attempted))
            })
    }

    pub async fn update(
        &self,
        principal: &Principal,
        path: &DocumentPath,
        patch: Map<String, Value>,
    ) -> Result<(), StoreError> {
        let attempted = Value::Object(patch.clone());
        self.store
            .update(principal, path, patch)
            .await
            .inspect_err(|e| {
                self.report(e, path.to_string(), Operation::Update, Some(attempted))
            })
    }

    pub async fn delete(&self, principal: &Principal, path: &DocumentPath) -> Result<(), StoreError> {
        self.store
            .delete(principal, path)
            .await
            .inspect_err(|e| self.report(e, path.to_string(), Operation::Delete, None))
    }

    /// A rejected batch is reported once, against its primary document.
    pub async fn commit(&self, principal: &Principal, batch: WriteBatch) -> Result<(), StoreError> {
        let primary = batch.primary().map(|op| {
            (
                op.path().to_string(),
                op.operation(),
                op.data().cloned().map(Value::Object),
            )
        });
        self.store
            .commit(principal, batch)
            .await
            .inspect_err(|e| {
                if let Some((path, operation, data)) = primary {
                    self.report(e, path, operation, data);
                }
            })
    }

    fn report(&self, error: &StoreError, path: String, operation: Operation, data: Option<Value>) {
        if error.is_permission_denied() {
            self.channel.emit(ErrorEvent::Permission(PermissionError::new(
                path, operation, data,
            )));
        }
    }
}
