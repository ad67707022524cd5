use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use async_trait::async_trait;
use kernel::store::{
    check, Change, Collection, Document, DocumentPath, DocumentStore, Operation, Principal, Query,
    StoreError, WriteBatch, WriteOp,
};
use serde_json::{Map, Value};
use tokio::sync::broadcast;

use super::feed::ChangeFeed;

struct StoredDocument {
    seq: u64,
    fields: Map<String, Value>,
}

#[derive(Default)]
struct Collections {
    next_seq: u64,
    docs: HashMap<Collection, HashMap<String, StoredDocument>>,
}

impl Collections {
    fn fields(&self, path: &DocumentPath) -> Option<&Map<String, Value>> {
        self.docs
            .get(&path.collection())
            .and_then(|docs| docs.get(path.id()))
            .map(|stored| &stored.fields)
    }

    // バッチ内の先行する書き込みも反映した状態で各操作を検証する
    fn validate(&self, ops: &[WriteOp]) -> Result<(), StoreError> {
        let mut staged: HashMap<&DocumentPath, Option<Map<String, Value>>> = HashMap::new();
        for op in ops {
            let path = op.path();
            let current = match staged.get(path) {
                Some(fields) => fields.clone(),
                None => self.fields(path).cloned(),
            };
            let next = match op {
                WriteOp::Create { data, .. } => {
                    if current.is_some() {
                        return Err(StoreError::AlreadyExists(path.to_string()));
                    }
                    Some(data.clone())
                }
                WriteOp::Update { patch, expect, .. } => {
                    let Some(mut fields) = current else {
                        return Err(StoreError::NotFound(path.to_string()));
                    };
                    if !expect.iter().all(|(field, value)| fields.get(field) == Some(value)) {
                        return Err(StoreError::Conflict(path.to_string()));
                    }
                    fields.extend(patch.clone());
                    Some(fields)
                }
                WriteOp::Delete { .. } => None,
            };
            staged.insert(path, next);
        }
        Ok(())
    }

    fn apply(&mut self, op: &WriteOp) {
        let path = op.path();
        let docs = self.docs.entry(path.collection()).or_default();
        match op {
            WriteOp::Create { data, .. } => {
                self.next_seq += 1;
                docs.insert(
                    path.id().to_string(),
                    StoredDocument {
                        seq: self.next_seq,
                        fields: data.clone(),
                    },
                );
            }
            WriteOp::Update { patch, .. } => {
                if let Some(stored) = docs.get_mut(path.id()) {
                    stored.fields.extend(patch.clone());
                }
            }
            WriteOp::Delete { .. } => {
                docs.remove(path.id());
            }
        }
    }
}

/// Document store held in process memory. Used for local development and
/// tests; enforces the same access rules as the PostgreSQL backend.
#[derive(Default)]
pub struct MemoryDocumentStore {
    inner: Mutex<Collections>,
    feed: ChangeFeed,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Collections> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(
        &self,
        principal: &Principal,
        path: &DocumentPath,
    ) -> Result<Option<Document>, StoreError> {
        check(principal, path.collection(), Some(path.id()), Operation::Get, None)?;
        Ok(self
            .lock()
            .docs
            .get(&path.collection())
            .and_then(|docs| docs.get(path.id()))
            .map(|stored| Document::new(path.id(), stored.fields.clone())))
    }

    async fn list(
        &self,
        principal: &Principal,
        query: &Query,
    ) -> Result<Vec<Document>, StoreError> {
        check(principal, query.target(), None, Operation::List, None)?;
        let inner = self.lock();
        let mut matched: Vec<(u64, Document)> = inner
            .docs
            .get(&query.target())
            .map(|docs| {
                docs.iter()
                    .filter(|(_, stored)| query.matches(&stored.fields))
                    .map(|(id, stored)| (stored.seq, Document::new(id.clone(), stored.fields.clone())))
                    .collect()
            })
            .unwrap_or_default();
        matched.sort_by_key(|(seq, _)| *seq);
        Ok(matched.into_iter().map(|(_, doc)| doc).collect())
    }

    async fn commit(&self, principal: &Principal, batch: WriteBatch) -> Result<(), StoreError> {
        for op in batch.ops() {
            check(
                principal,
                op.path().collection(),
                Some(op.path().id()),
                op.operation(),
                op.data(),
            )?;
        }
        {
            // 検証と適用を同じロックの中で行う
            let mut inner = self.lock();
            inner.validate(batch.ops())?;
            for op in batch.ops() {
                inner.apply(op);
            }
        }
        self.feed.publish_committed(batch.ops());
        Ok(())
    }

    fn changes(&self) -> broadcast::Receiver<Change> {
        self.feed.subscribe()
    }

    async fn ping(&self) -> bool {
        true
    }
}
