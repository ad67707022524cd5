//! Live read bindings: keep a value in sync with one document or one query.
//!
//! A binding owns at most one live subscription. Pointing it at a new
//! reference tears the old subscription down before the next one starts,
//! and snapshots still in flight from a torn-down subscription are
//! discarded.

use std::{
    marker::PhantomData,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::{sync::watch, task::JoinHandle};

use crate::channel::{ErrorChannel, ErrorEvent};
use crate::store::{
    live::{self, Subscription},
    Document, DocumentPath, DocumentStore, Operation, PermissionError, Principal, Query,
    StoreError, SubscriptionKey,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BindingError {
    #[error(transparent)]
    Permission(PermissionError),
    #[error("{0}")]
    Store(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BindingState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<BindingError>,
}

impl<T> BindingState<T> {
    pub fn idle() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }

    fn loading() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }

    fn ready(data: Option<T>) -> Self {
        Self {
            data,
            loading: false,
            error: None,
        }
    }

    fn failed(error: BindingError) -> Self {
        Self {
            data: None,
            loading: false,
            error: Some(error),
        }
    }
}

/// What a binding subscribes to: a document path or a query.
trait Source: Send + 'static {
    type Snapshot: Clone + PartialEq + Send + 'static;
    type Value: Send + Sync + 'static;

    const OPERATION: Operation;

    fn key(&self) -> SubscriptionKey;
    fn resource_path(&self) -> String;
    fn open(
        self,
        store: Arc<dyn DocumentStore>,
        principal: Principal,
    ) -> Subscription<Self::Snapshot>;
    fn decode(snapshot: &Self::Snapshot) -> Result<Option<Self::Value>, StoreError>;
}

struct DocSource<T>(DocumentPath, PhantomData<fn() -> T>);

impl<T: DeserializeOwned + Send + Sync + 'static> Source for DocSource<T> {
    type Snapshot = Option<Document>;
    type Value = T;

    const OPERATION: Operation = Operation::Get;

    fn key(&self) -> SubscriptionKey {
        self.0.key()
    }

    fn resource_path(&self) -> String {
        self.0.to_string()
    }

    fn open(self, store: Arc<dyn DocumentStore>, principal: Principal) -> Subscription<Self::Snapshot> {
        live::watch_document(store, principal, self.0)
    }

    fn decode(snapshot: &Self::Snapshot) -> Result<Option<T>, StoreError> {
        snapshot.as_ref().map(|d| d.decode::<T>()).transpose()
    }
}

struct QuerySource<T>(Query, PhantomData<fn() -> T>);

impl<T: DeserializeOwned + Send + Sync + 'static> Source for QuerySource<T> {
    type Snapshot = Vec<Document>;
    type Value = Vec<T>;

    const OPERATION: Operation = Operation::List;

    fn key(&self) -> SubscriptionKey {
        self.0.key()
    }

    fn resource_path(&self) -> String {
        self.0.target().to_string()
    }

    fn open(self, store: Arc<dyn DocumentStore>, principal: Principal) -> Subscription<Self::Snapshot> {
        live::watch_query(store, principal, self.0)
    }

    fn decode(snapshot: &Self::Snapshot) -> Result<Option<Vec<T>>, StoreError> {
        snapshot
            .iter()
            .map(|d| d.decode::<T>())
            .collect::<Result<Vec<T>, _>>()
            .map(Some)
    }
}

struct BindingCore<V> {
    store: Arc<dyn DocumentStore>,
    channel: ErrorChannel,
    principal: Principal,
    state: Arc<watch::Sender<BindingState<V>>>,
    generation: Arc<AtomicU64>,
    key: Option<SubscriptionKey>,
    task: Option<JoinHandle<()>>,
}

impl<V: Send + Sync + 'static> BindingCore<V> {
    fn new(store: Arc<dyn DocumentStore>, channel: ErrorChannel, principal: Principal) -> Self {
        let (state, _) = watch::channel(BindingState::idle());
        Self {
            store,
            channel,
            principal,
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
            key: None,
            task: None,
        }
    }

    fn bind<S: Source<Value = V>>(&mut self, source: Option<S>) {
        let key = source.as_ref().map(Source::key);
        if key.is_some() && key == self.key {
            return;
        }
        self.teardown();
        self.key = key;

        let Some(source) = source else {
            self.state.send_replace(BindingState::idle());
            return;
        };

        self.state.send_replace(BindingState::loading());
        let generation = self.generation.load(Ordering::SeqCst);
        let resource_path = source.resource_path();
        let mut subscription = source.open(self.store.clone(), self.principal.clone());
        let state = self.state.clone();
        let current = self.generation.clone();
        let channel = self.channel.clone();

        self.task = Some(tokio::spawn(async move {
            // 破棄済みの購読からの値は反映しない
            let apply = |next: BindingState<V>| {
                state.send_if_modified(|slot| {
                    if current.load(Ordering::SeqCst) != generation {
                        return false;
                    }
                    *slot = next;
                    true
                });
            };

            while let Some(delivery) = subscription.next().await {
                match delivery.and_then(|snapshot| S::decode(&snapshot)) {
                    Ok(data) => apply(BindingState::ready(data)),
                    Err(StoreError::PermissionDenied(_)) => {
                        let error = PermissionError::new(resource_path.clone(), S::OPERATION, None);
                        channel.emit(ErrorEvent::Permission(error.clone()));
                        apply(BindingState::failed(BindingError::Permission(error)));
                        return;
                    }
                    Err(e) => {
                        tracing::warn!(path = %resource_path, error = %e, "live subscription failed");
                        apply(BindingState::failed(BindingError::Store(e.to_string())));
                        return;
                    }
                }
            }
        }));
    }

    fn teardown(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl<V> Drop for BindingCore<V> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Live binding to a single document, decoded as `T` with its id injected.
pub struct DocBinding<T: DeserializeOwned + Send + Sync + 'static> {
    core: BindingCore<T>,
}

impl<T: DeserializeOwned + Send + Sync + 'static> DocBinding<T> {
    pub fn new(store: Arc<dyn DocumentStore>, channel: ErrorChannel, principal: Principal) -> Self {
        Self {
            core: BindingCore::new(store, channel, principal),
        }
    }

    /// `None` tears down any subscription and resets to the idle state.
    /// Must be called from within a tokio runtime.
    pub fn bind(&mut self, path: Option<DocumentPath>) {
        self.core
            .bind(path.map(|p| DocSource::<T>(p, PhantomData)));
    }

    pub fn watch(&self) -> watch::Receiver<BindingState<T>> {
        self.core.state.subscribe()
    }

    pub fn state(&self) -> BindingState<T>
    where
        T: Clone,
    {
        self.core.state.borrow().clone()
    }
}

/// Live binding to a query's result set, in arrival order.
pub struct CollectionBinding<T: DeserializeOwned + Send + Sync + 'static> {
    core: BindingCore<Vec<T>>,
}

impl<T: DeserializeOwned + Send + Sync + 'static> CollectionBinding<T> {
    pub fn new(store: Arc<dyn DocumentStore>, channel: ErrorChannel, principal: Principal) -> Self {
        Self {
            core: BindingCore::new(store, channel, principal),
        }
    }

    /// `None` tears down any subscription and resets to the idle state.
    /// Must be called from within a tokio runtime.
    pub fn bind(&mut self, query: Option<Query>) {
        self.core
            .bind(query.map(|q| QuerySource::<T>(q, PhantomData)));
    }

    pub fn watch(&self) -> watch::Receiver<BindingState<Vec<T>>> {
        self.core.state.subscribe()
    }

    pub fn state(&self) -> BindingState<Vec<T>>
    where
        T: Clone,
    {
        self.core.state.borrow().clone()
    }
}
