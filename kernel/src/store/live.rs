//! Live subscriptions built on top of any [`DocumentStore`].
//!
//! A subscription reads its target once, then re-reads whenever the change
//! feed reports a write to the watched document or collection, and forwards
//! every distinct snapshot. The first error ends the subscription.

use std::{future::Future, sync::Arc};

use tokio::{
    sync::{broadcast::error::RecvError, mpsc},
    task::JoinHandle,
};

use crate::store::{Change, Document, DocumentPath, DocumentStore, Principal, Query, StoreError};

const SNAPSHOT_BUFFER: usize = 16;

pub struct Subscription<T> {
    rx: mpsc::Receiver<Result<T, StoreError>>,
    task: JoinHandle<()>,
}

impl<T> Subscription<T> {
    /// `None` once the subscription has ended.
    pub async fn next(&mut self) -> Option<Result<T, StoreError>> {
        self.rx.recv().await
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub fn watch_document(
    store: Arc<dyn DocumentStore>,
    principal: Principal,
    path: DocumentPath,
) -> Subscription<Option<Document>> {
    let target = path.clone();
    let reader = store.clone();
    spawn_watch(
        store,
        move |change| change.path == target,
        move || {
            let store = reader.clone();
            let principal = principal.clone();
            let path = path.clone();
            async move { store.get(&principal, &path).await }
        },
    )
}

pub fn watch_query(
    store: Arc<dyn DocumentStore>,
    principal: Principal,
    query: Query,
) -> Subscription<Vec<Document>> {
    let target = query.target();
    let reader = store.clone();
    spawn_watch(
        store,
        move |change| change.path.collection() == target,
        move || {
            let store = reader.clone();
            let principal = principal.clone();
            let query = query.clone();
            async move { store.list(&principal, &query).await }
        },
    )
}

fn spawn_watch<T, R, F, Fut>(
    store: Arc<dyn DocumentStore>,
    relevant: R,
    read: F,
) -> Subscription<T>
where
    T: Clone + PartialEq + Send + 'static,
    R: Fn(&Change) -> bool + Send + 'static,
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, StoreError>> + Send + 'static,
{
    let (tx, rx) = mpsc::channel(SNAPSHOT_BUFFER);
    // 初回読み込みより前に購読しておき、その間の書き込みを取りこぼさない
    let mut changes = store.changes();
    let task = tokio::spawn(async move {
        let mut last: Option<T> = None;
        loop {
            match read().await {
                Ok(snapshot) => {
                    if last.as_ref() != Some(&snapshot) {
                        if tx.send(Ok(snapshot.clone())).await.is_err() {
                            return;
                        }
                        last = Some(snapshot);
                    }
                }
                Err(e) => {
                    let _ = tx.send(Err(e)).await;
                    return;
                }
            }
            loop {
                match changes.recv().await {
                    Ok(change) if relevant(&change) => break,
                    Ok(_) => continue,
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::debug!(skipped, "change feed lagged, re-reading snapshot");
                        break;
                    }
                    Err(RecvError::Closed) => return,
                }
            }
        }
    });
    Subscription { rx, task }
}
